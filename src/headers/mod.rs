// ============================================================================
// Headers - event message <-> Kafka record header codec
// ============================================================================
//
// - value:     scalar codec (typed values <-> bytes)
// - record:    the header collection itself
// - accessor:  typed reads/writes on a collection
// - mapper:    pluggable (key, value) -> header function
// - namespace: metadata key prefixing
// - assembler: full header set for generic and domain events
//
// ============================================================================

pub mod accessor;
pub mod assembler;
pub mod errors;
pub mod mapper;
pub mod namespace;
pub mod record;
pub mod value;

// Reserved envelope header keys. These literals are shared with consumers
// on other platforms and must not change.
pub const MESSAGE_ID: &str = "axon-message-id";
pub const MESSAGE_TIMESTAMP: &str = "axon-message-timestamp";
pub const MESSAGE_TYPE: &str = "axon-message-type";
pub const MESSAGE_REVISION: &str = "axon-message-revision";
pub const MESSAGE_METADATA: &str = "axon-metadata";
pub const AGGREGATE_ID: &str = "axon-message-aggregate-id";
pub const AGGREGATE_TYPE: &str = "axon-message-aggregate-type";
pub const AGGREGATE_SEQ: &str = "axon-message-aggregate-seq";

pub use accessor::{
    add_header, add_header_with, keys, value, value_as_long, value_as_string, value_as_string_lossy,
    value_as_string_or, value_as_timestamp,
};
pub use assembler::{append_event_headers, extract_axon_metadata, is_axon_message, to_headers};
pub use errors::{HeaderError, HeaderResult};
pub use mapper::{byte_mapper, ByteMapper, HeaderValueMapper};
pub use namespace::{extract_key, generate_metadata_key, is_metadata_key};
pub use record::{RecordHeader, RecordHeaders};
pub use value::{
    decode_double, decode_float, decode_int, decode_long, decode_short, decode_text,
    decode_text_lossy, decode_timestamp, encode_value, HeaderValue, ValueKind,
};
