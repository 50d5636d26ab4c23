//! Explicitly constructed metrics sink.
//!
//! Counters and histograms are registered once at startup and handed to
//! components by `Arc` reference. Library code never touches a global
//! registry; installing an exporter (or not) is the binary's decision.

use metrics::{Counter, Histogram, counter, histogram};

/// Metric handles shared across the redirect path, the producer, and the
/// consumer loop.
pub struct Metrics {
    /// Click events successfully acknowledged by the log transport.
    pub clicks_published: Counter,
    /// Click events that failed to publish (logged and swallowed upstream).
    pub publish_errors: Counter,
    /// Click events fully aggregated by the consumer.
    pub events_processed: Counter,
    /// Malformed payloads skipped by the consumer (offset still advances).
    pub events_skipped: Counter,
    /// Click events whose aggregation failed or timed out.
    pub events_failed: Counter,
    /// Wall-clock seconds spent in the per-message aggregation call.
    pub process_duration: Histogram,
    /// Link cache hits during resolution (positive and negative).
    pub cache_hits: Counter,
    /// Link cache misses that fell through to the durable store.
    pub cache_misses: Counter,
    /// Best-effort cache writes that failed.
    pub cache_write_errors: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            clicks_published: counter!("kafka_producer_published_total"),
            publish_errors: counter!("kafka_producer_errors_total"),
            events_processed: counter!("kafka_consumer_processed_total"),
            events_skipped: counter!("kafka_consumer_skipped_total"),
            events_failed: counter!("kafka_consumer_errors_total"),
            process_duration: histogram!("kafka_consumer_process_duration_seconds"),
            cache_hits: counter!("cache_hits_total"),
            cache_misses: counter!("cache_misses_total"),
            cache_write_errors: counter!("cache_write_errors_total"),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
