use super::errors::HeaderResult;
use super::record::RecordHeader;
use super::value::{encode_value, HeaderValue};

/// Turns a `(key, value)` pair into a header.
///
/// Implemented for any `Fn(&str, &HeaderValue) -> HeaderResult<RecordHeader>`,
/// so a closure can stand in for the default `ByteMapper`.
pub trait HeaderValueMapper: Send + Sync {
    fn map(&self, key: &str, value: &HeaderValue) -> HeaderResult<RecordHeader>;
}

impl<F> HeaderValueMapper for F
where
    F: Fn(&str, &HeaderValue) -> HeaderResult<RecordHeader> + Send + Sync,
{
    fn map(&self, key: &str, value: &HeaderValue) -> HeaderResult<RecordHeader> {
        self(key, value)
    }
}

/// Default mapper: encodes through the scalar codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteMapper;

impl HeaderValueMapper for ByteMapper {
    fn map(&self, key: &str, value: &HeaderValue) -> HeaderResult<RecordHeader> {
        Ok(RecordHeader::new(key, encode_value(key, value)?))
    }
}

pub fn byte_mapper() -> ByteMapper {
    ByteMapper
}
