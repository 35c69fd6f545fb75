use super::value::ValueKind;

// ============================================================================
// Header Codec Errors
// ============================================================================
//
// Every variant is a contract violation raised synchronously. A missing key
// or a null header value is NOT an error; those surface as `None`.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("Headers may not be null")]
    MissingHeaders,

    #[error("Cannot extract metadata key from {0:?}")]
    InvalidMetadataKey(Option<String>),

    #[error("Unsupported value kind {kind:?} for header {key}")]
    UnsupportedKind { key: String, kind: ValueKind },

    #[error("Expected {expected} bytes for {kind:?} value, got {actual}")]
    InvalidWidth {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },

    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),

    #[error("Header value is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type HeaderResult<T> = Result<T, HeaderError>;
