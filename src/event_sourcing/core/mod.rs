// ============================================================================
// Event Sourcing Core - event messages and payload serialization
// ============================================================================

pub mod event;
pub mod serialization;

// Re-export core types for convenience
pub use event::{AggregateSequence, EventMessage, MetaData};
pub use serialization::{serialize_payload, EventPayload, SerializedObject, SerializedType};
