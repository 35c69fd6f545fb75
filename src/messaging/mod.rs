// ============================================================================
// Messaging - event messages <-> Kafka records
// ============================================================================

pub mod config;
pub mod converter;
mod kafka_headers;

pub use config::{ConverterConfig, SequencingPolicy};
pub use converter::{KafkaMessageConverter, KafkaRecord};
