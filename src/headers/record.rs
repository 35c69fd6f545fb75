// ============================================================================
// Record Headers - ordered (key, optional bytes) collection
// ============================================================================
//
// Mirrors the header set of a Kafka record: keys may repeat, insertion order
// is kept, and reads resolve to the last header written for a key.
//
// ============================================================================

/// A single `(key, value)` header. A `None` value is a header that was
/// written with a null value, which is different from a missing header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    key: String,
    value: Option<Vec<u8>>,
}

impl RecordHeader {
    pub fn new(key: impl Into<String>, value: Option<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordHeaders {
    headers: Vec<RecordHeader>,
}

impl RecordHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: Vec::with_capacity(capacity),
        }
    }

    /// Append a header; earlier headers with the same key are kept
    pub fn add(&mut self, header: RecordHeader) {
        self.headers.push(header);
    }

    /// Last header written for `key`, if any
    pub fn last_header(&self, key: &str) -> Option<&RecordHeader> {
        self.headers.iter().rev().find(|h| h.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordHeader> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordHeaders {
    type Item = &'a RecordHeader;
    type IntoIter = std::slice::Iter<'a, RecordHeader>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl IntoIterator for RecordHeaders {
    type Item = RecordHeader;
    type IntoIter = std::vec::IntoIter<RecordHeader>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl FromIterator<RecordHeader> for RecordHeaders {
    fn from_iter<I: IntoIterator<Item = RecordHeader>>(iter: I) -> Self {
        Self {
            headers: iter.into_iter().collect(),
        }
    }
}

impl Extend<RecordHeader> for RecordHeaders {
    fn extend<I: IntoIterator<Item = RecordHeader>>(&mut self, iter: I) {
        self.headers.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_on_read() {
        let mut headers = RecordHeaders::new();
        headers.add(RecordHeader::new("a", Some(b"1".to_vec())));
        headers.add(RecordHeader::new("b", Some(b"2".to_vec())));
        headers.add(RecordHeader::new("a", Some(b"3".to_vec())));

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.last_header("a").unwrap().value(), Some(&b"3"[..]));
        assert_eq!(headers.iter().filter(|h| h.key() == "a").count(), 2);
    }

    #[test]
    fn test_missing_null_and_present_are_distinguishable() {
        let mut headers = RecordHeaders::new();
        headers.add(RecordHeader::new("null", None));
        headers.add(RecordHeader::new("present", Some(Vec::new())));

        assert!(headers.last_header("missing").is_none());
        assert_eq!(headers.last_header("null").unwrap().value(), None);
        assert_eq!(headers.last_header("present").unwrap().value(), Some(&b""[..]));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let headers: RecordHeaders = ["c", "a", "b"]
            .into_iter()
            .map(|k| RecordHeader::new(k, None))
            .collect();

        let keys: Vec<&str> = headers.iter().map(RecordHeader::key).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }
}
