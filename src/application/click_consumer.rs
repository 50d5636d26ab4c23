//! Sequential click-event consumer loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::application::services::AnalyticsService;
use crate::domain::entities::ClickEvent;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;
use crate::metrics::Metrics;

/// Default bound on how long a single message may spend in processing.
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(5);

/// A raw message read from the click topic, with enough position
/// information to commit it afterwards.
#[derive(Debug, Clone)]
pub struct ClickMessage {
    pub payload: Vec<u8>,
    pub partition: i32,
    pub offset: i64,
}

/// Source of click messages, commit-after-handling style.
///
/// `commit` acknowledges a single message; it must only be called after
/// the message has been fully handled or deliberately skipped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickSource: Send + Sync {
    async fn recv(&self) -> Result<ClickMessage, AppError>;
    async fn commit(&self, message: &ClickMessage) -> Result<(), AppError>;
}

#[async_trait]
impl<T: ClickSource + ?Sized> ClickSource for Arc<T> {
    async fn recv(&self) -> Result<ClickMessage, AppError> {
        self.as_ref().recv().await
    }

    async fn commit(&self, message: &ClickMessage) -> Result<(), AppError> {
        self.as_ref().commit(message).await
    }
}

/// Drives the at-least-once aggregation loop: read, decode, process,
/// commit, one message at a time.
///
/// Offsets are committed only after handling, so a crash mid-message
/// redelivers it; the duplicate is then absorbed by the event-id
/// constraint in the store. Malformed payloads are logged, counted and
/// committed past rather than wedging the partition.
pub struct ClickConsumer<S: ClickSource, R: AnalyticsRepository> {
    source: S,
    analytics: Arc<AnalyticsService<R>>,
    process_timeout: Duration,
    metrics: Arc<Metrics>,
}

impl<S: ClickSource, R: AnalyticsRepository> ClickConsumer<S, R> {
    pub fn new(source: S, analytics: Arc<AnalyticsService<R>>, metrics: Arc<Metrics>) -> Self {
        Self {
            source,
            analytics,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
            metrics,
        }
    }

    /// Overrides the per-message processing timeout.
    pub fn with_process_timeout(mut self, process_timeout: Duration) -> Self {
        self.process_timeout = process_timeout;
        self
    }

    /// Runs until the token is cancelled or the source fails fatally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Delivery`] when the source stops yielding
    /// messages for a reason other than shutdown.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), AppError> {
        info!("click consumer started");

        loop {
            let message = tokio::select! {
                () = shutdown.cancelled() => {
                    info!("click consumer stopping");
                    return Ok(());
                }
                received = self.source.recv() => match received {
                    Ok(message) => message,
                    Err(e) => {
                        if shutdown.is_cancelled() {
                            info!("click consumer stopping");
                            return Ok(());
                        }
                        return Err(e);
                    }
                },
            };

            self.handle_message(&message).await;

            if let Err(e) = self.source.commit(&message).await {
                // The message was handled; on redelivery the event-id
                // constraint keeps the count unchanged.
                error!(
                    partition = message.partition,
                    offset = message.offset,
                    error = %e,
                    "failed to commit offset"
                );
            }
        }
    }

    async fn handle_message(&self, message: &ClickMessage) {
        let event: ClickEvent = match serde_json::from_slice(&message.payload) {
            Ok(event) => event,
            Err(e) => {
                self.metrics.events_skipped.increment(1);
                warn!(
                    partition = message.partition,
                    offset = message.offset,
                    error = %e,
                    "skipping malformed click event"
                );
                return;
            }
        };

        let started = Instant::now();
        match timeout(self.process_timeout, self.analytics.process_click(&event)).await {
            Ok(Ok(())) => {
                self.metrics.events_processed.increment(1);
                self.metrics
                    .process_duration
                    .record(started.elapsed().as_secs_f64());
            }
            Ok(Err(e)) => {
                self.metrics.events_failed.increment(1);
                error!(
                    event_id = %event.event_id,
                    link_id = event.link_id,
                    error = %e,
                    "failed to process click event"
                );
            }
            Err(_) => {
                self.metrics.events_failed.increment(1);
                error!(
                    event_id = %event.event_id,
                    link_id = event.link_id,
                    timeout_secs = self.process_timeout.as_secs(),
                    "click event processing timed out"
                );
            }
        }
    }
}
