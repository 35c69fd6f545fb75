use super::errors::{HeaderError, HeaderResult};
use super::MESSAGE_METADATA;

// ============================================================================
// Metadata Key Namespacing
// ============================================================================
//
// User metadata travels as `axon-metadata-<key>`. Extraction strips the fixed
// prefix plus exactly one separator, so a key that itself starts with
// "axon-metadata" survives the round trip unchanged.
//
// ============================================================================

const SEPARATOR: char = '-';

fn namespace_prefix() -> String {
    format!("{}{}", MESSAGE_METADATA, SEPARATOR)
}

/// Namespaced header key for a metadata entry.
///
/// A missing key renders as the literal text `null`.
pub fn generate_metadata_key<'a>(key: impl Into<Option<&'a str>>) -> String {
    format!("{}{}", namespace_prefix(), key.into().unwrap_or("null"))
}

/// Original metadata key from a namespaced header key
pub fn extract_key<'a>(key: impl Into<Option<&'a str>>) -> HeaderResult<String> {
    let key = key.into();
    key.and_then(|k| k.strip_prefix(namespace_prefix().as_str()))
        .map(str::to_string)
        .ok_or_else(|| HeaderError::InvalidMetadataKey(key.map(str::to_string)))
}

pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(namespace_prefix().as_str())
}
