//! Producer trait for the click-event log transport.

use crate::domain::entities::ClickEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Publishes click events into the partitioned click log.
///
/// Called synchronously on the redirect hot path. The caller logs and
/// discards the error: a publish failure never changes the redirect's
/// outcome. One publish per redirect, no batching or buffering.
///
/// # Implementations
///
/// - [`crate::infrastructure::kafka::KafkaClickProducer`] - Kafka with all-replica acks
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickProducer: Send + Sync {
    /// Serializes the event and publishes it, keyed by the link's numeric
    /// identity, waiting for the transport's durability acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Encoding`] if serialization fails (should not
    /// happen for well-formed events) and [`AppError::Delivery`] on
    /// transport or acknowledgment failure.
    async fn publish_click(&self, event: &ClickEvent) -> Result<(), AppError>;
}
