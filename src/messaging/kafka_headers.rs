use rdkafka::message::{Header, Headers, OwnedHeaders};

use crate::headers::{RecordHeader, RecordHeaders};

// ============================================================================
// RecordHeaders <-> rdkafka headers
// ============================================================================
//
// Order and null values are preserved in both directions, so duplicate keys
// keep their last-write-wins meaning on the other side.
//
// ============================================================================

impl RecordHeaders {
    /// Copy into an rdkafka header set for a producer record
    pub fn to_kafka_headers(&self) -> OwnedHeaders {
        self.iter().fold(OwnedHeaders::new_with_capacity(self.len()), |acc, h| {
            acc.insert(Header {
                key: h.key(),
                value: h.value(),
            })
        })
    }

    /// Copy out of the header set of a consumed rdkafka message
    pub fn from_kafka_headers<H: Headers>(headers: &H) -> Self {
        headers
            .iter()
            .map(|h| RecordHeader::new(h.key, h.value.map(<[u8]>::to_vec)))
            .collect()
    }
}
