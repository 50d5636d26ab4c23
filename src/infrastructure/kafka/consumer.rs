//! Kafka-backed message source for the click consumer loop.

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::{Offset, TopicPartitionList};

use crate::application::click_consumer::{ClickMessage, ClickSource};
use crate::error::AppError;

/// Reads click events from a Kafka topic as part of a consumer group.
///
/// Auto-commit is disabled: the consumer loop commits each offset only
/// after the message has been fully handled, so a crash between read and
/// aggregation redelivers instead of silently dropping.
pub struct KafkaClickSource {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaClickSource {
    /// Joins the consumer group and subscribes to the click topic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Delivery`] if the client cannot be constructed
    /// or the subscription fails.
    pub fn new(brokers: &str, group_id: &str, topic: &str) -> Result<Self, AppError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| AppError::Delivery(format!("create kafka consumer: {e}")))?;

        consumer
            .subscribe(&[topic])
            .map_err(|e| AppError::Delivery(format!("subscribe to {topic}: {e}")))?;

        Ok(Self {
            consumer,
            topic: topic.to_string(),
        })
    }
}

#[async_trait]
impl ClickSource for KafkaClickSource {
    async fn recv(&self) -> Result<ClickMessage, AppError> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| AppError::Delivery(format!("read click topic: {e}")))?;

        Ok(ClickMessage {
            payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
            partition: message.partition(),
            offset: message.offset(),
        })
    }

    async fn commit(&self, message: &ClickMessage) -> Result<(), AppError> {
        let mut offsets = TopicPartitionList::new();
        offsets
            .add_partition_offset(&self.topic, message.partition, Offset::Offset(message.offset + 1))
            .map_err(|e| AppError::Delivery(format!("build commit offsets: {e}")))?;

        self.consumer
            .commit(&offsets, CommitMode::Async)
            .map_err(|e| AppError::Delivery(format!("commit offset: {e}")))
    }
}
