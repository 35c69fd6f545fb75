// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Event messages and their serialized payload descriptors. The header codec
// in src/headers/ translates these to and from Kafka record headers.
//
// ============================================================================

mod core;

pub use self::core::*;
