//! Kafka producer for click events.

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::ClickProducer;
use crate::error::AppError;
use crate::metrics::Metrics;

const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes click events to a Kafka topic.
///
/// Configured with `acks=all`: once the decision to publish is made,
/// durability wins over latency. Messages are keyed by `link_id` so all
/// clicks for one link stay ordered on one partition.
pub struct KafkaClickProducer {
    producer: FutureProducer,
    topic: String,
    metrics: Arc<Metrics>,
}

impl KafkaClickProducer {
    /// Creates a producer connected to the given brokers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Delivery`] if the client cannot be constructed.
    pub fn new(brokers: &str, topic: &str, metrics: Arc<Metrics>) -> Result<Self, AppError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", "all")
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| AppError::Delivery(format!("create kafka producer: {e}")))?;

        Ok(Self {
            producer,
            topic: topic.to_string(),
            metrics,
        })
    }
}

#[async_trait]
impl ClickProducer for KafkaClickProducer {
    async fn publish_click(&self, event: &ClickEvent) -> Result<(), AppError> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| AppError::Encoding(format!("serialize click event: {e}")))?;
        let key = event.partition_key();

        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

        self.producer
            .send(record, PUBLISH_TIMEOUT)
            .await
            .map_err(|(e, _)| {
                self.metrics.publish_errors.increment(1);
                AppError::Delivery(format!("publish click event: {e}"))
            })?;

        self.metrics.clicks_published.increment(1);
        debug!(
            link_id = event.link_id,
            short_code = %event.short_code,
            event_id = %event.event_id,
            "click event published"
        );
        Ok(())
    }
}
