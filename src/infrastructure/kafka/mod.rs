//! Kafka adapters for the click-event log.

mod consumer;
mod producer;

pub use consumer::KafkaClickSource;
pub use producer::KafkaClickProducer;
