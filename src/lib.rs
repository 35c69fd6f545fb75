//! Codec between event messages and Kafka record headers.
//!
//! - [`headers`]: scalar codec, header accessors, metadata key namespacing and
//!   header assembly for generic and domain events
//! - [`event_sourcing`]: the event message model and payload serialization
//! - [`messaging`]: converter from event messages to Kafka records and back
//! - [`metrics`]: optional Prometheus counters for the converter

pub mod event_sourcing;
pub mod headers;
pub mod messaging;
pub mod metrics;

pub use event_sourcing::{EventMessage, EventPayload, MetaData, SerializedObject, SerializedType};
pub use headers::{HeaderError, HeaderValue, RecordHeader, RecordHeaders};
pub use messaging::{ConverterConfig, KafkaMessageConverter, KafkaRecord, SequencingPolicy};
