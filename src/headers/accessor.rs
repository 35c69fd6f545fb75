use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::errors::{HeaderError, HeaderResult};
use super::mapper::{ByteMapper, HeaderValueMapper};
use super::record::RecordHeaders;
use super::value::{decode_long, decode_text, decode_text_lossy, decode_timestamp, HeaderValue};

// ============================================================================
// Header Accessor - typed reads and writes on a header collection
// ============================================================================
//
// Read functions take `impl Into<Option<&RecordHeaders>>` because a consumed
// Kafka record may carry no header set at all. An absent collection is a
// caller error; an absent key is `Ok(None)`.
//
// ============================================================================

fn require<'a>(headers: impl Into<Option<&'a RecordHeaders>>) -> HeaderResult<&'a RecordHeaders> {
    headers.into().ok_or(HeaderError::MissingHeaders)
}

/// Raw bytes of the last header with `key`.
///
/// `None` when the key is missing or the header was written with a null value.
pub fn value<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
) -> HeaderResult<Option<&'a [u8]>> {
    Ok(require(headers)?.last_header(key).and_then(|h| h.value()))
}

pub fn value_as_string<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
) -> HeaderResult<Option<String>> {
    value(headers, key)?.map(decode_text).transpose()
}

/// Like `value_as_string`, replacing invalid UTF-8 instead of failing
pub fn value_as_string_lossy<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
) -> HeaderResult<Option<String>> {
    Ok(value(headers, key)?.map(decode_text_lossy))
}

/// Like `value_as_string`, falling back to `default` when there is no value
pub fn value_as_string_or<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
    default: &str,
) -> HeaderResult<String> {
    Ok(value_as_string(headers, key)?.unwrap_or_else(|| default.to_string()))
}

pub fn value_as_long<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
) -> HeaderResult<Option<i64>> {
    value(headers, key)?.map(decode_long).transpose()
}

pub fn value_as_timestamp<'a>(
    headers: impl Into<Option<&'a RecordHeaders>>,
    key: &str,
) -> HeaderResult<Option<DateTime<Utc>>> {
    value(headers, key)?.map(decode_timestamp).transpose()
}

/// Encode `value` with the default codec and append it under `key`
pub fn add_header(
    headers: &mut RecordHeaders,
    key: &str,
    value: impl Into<HeaderValue>,
) -> HeaderResult<()> {
    add_header_with(headers, key, &value.into(), &ByteMapper)
}

/// Append exactly one header produced by `mapper`; nothing is written if the
/// mapper fails.
pub fn add_header_with<M>(
    headers: &mut RecordHeaders,
    key: &str,
    value: &HeaderValue,
    mapper: &M,
) -> HeaderResult<()>
where
    M: HeaderValueMapper + ?Sized,
{
    let header = mapper.map(key, value)?;
    headers.add(header);
    Ok(())
}

/// Distinct keys present in the collection
pub fn keys<'a>(headers: impl Into<Option<&'a RecordHeaders>>) -> HeaderResult<BTreeSet<String>> {
    Ok(require(headers)?
        .iter()
        .map(|h| h.key().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::value::{decode_double, decode_float, decode_int, decode_short};
    use chrono::TimeZone;
    use std::fmt;

    fn raw<'a>(headers: &'a RecordHeaders, key: &str) -> &'a [u8] {
        value(headers, key).unwrap().unwrap()
    }

    #[test]
    fn test_reading_existing_key_returns_bytes() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "bar", "a1b2").unwrap();

        assert_eq!(value(&headers, "bar").unwrap(), Some(&b"a1b2"[..]));
    }

    #[test]
    fn test_reading_missing_key_returns_none() {
        let headers = RecordHeaders::new();

        assert_eq!(value(&headers, "123").unwrap(), None);
        assert_eq!(value_as_string(&headers, "some-invalid-key").unwrap(), None);
        assert_eq!(value_as_long(&headers, "some-invalid-key").unwrap(), None);
    }

    #[test]
    fn test_reading_from_absent_headers_fails() {
        assert!(matches!(value(None::<&RecordHeaders>, "bar"), Err(HeaderError::MissingHeaders)));
        assert!(matches!(value_as_string(None::<&RecordHeaders>, "bar"), Err(HeaderError::MissingHeaders)));
        assert!(matches!(value_as_long(None::<&RecordHeaders>, "bar"), Err(HeaderError::MissingHeaders)));
        assert!(matches!(keys(None::<&RecordHeaders>), Err(HeaderError::MissingHeaders)));
    }

    #[test]
    fn test_reading_text_with_and_without_default() {
        let mut headers = RecordHeaders::new();
        let expected = "Şơм℮ śẩмρŀę ÅŚÇÍỈ-ťęҳť FFlETYeKU3H5QRqw";
        add_header(&mut headers, "foo", expected).unwrap();

        assert_eq!(value_as_string(&headers, "foo").unwrap().as_deref(), Some(expected));
        assert_eq!(value_as_string_or(&headers, "foo", "default-value").unwrap(), expected);
        assert_eq!(
            value_as_string_or(&headers, "some-invalid-key", "default-value").unwrap(),
            "default-value"
        );
    }

    #[test]
    fn test_reading_binary_value_as_text() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "double", 0.5f64).unwrap();

        assert!(matches!(value_as_string(&headers, "double"), Err(HeaderError::InvalidUtf8(_))));
        let lossy = value_as_string_lossy(&headers, "double").unwrap().unwrap();
        assert_eq!(lossy, String::from_utf8_lossy(&0.5f64.to_be_bytes()));
        assert_eq!(value_as_string_lossy(&headers, "missing").unwrap(), None);
        assert!(matches!(
            value_as_string_lossy(None::<&RecordHeaders>, "double"),
            Err(HeaderError::MissingHeaders)
        ));
    }

    #[test]
    fn test_reading_long_values() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "positive", 4_891_009_213_886_262i64).unwrap();
        add_header(&mut headers, "zero", 0i64).unwrap();
        add_header(&mut headers, "negative", -489_120_092_138_862_621i64).unwrap();

        assert_eq!(value_as_long(&headers, "positive").unwrap(), Some(4_891_009_213_886_262));
        assert_eq!(value_as_long(&headers, "zero").unwrap(), Some(0));
        assert_eq!(value_as_long(&headers, "negative").unwrap(), Some(-489_120_092_138_862_621));
    }

    #[test]
    fn test_writing_timestamp_is_read_back_as_long() {
        let mut headers = RecordHeaders::new();
        let ts = Utc::now();
        add_header(&mut headers, "baz", ts).unwrap();

        assert_eq!(value_as_long(&headers, "baz").unwrap(), Some(ts.timestamp_millis()));
    }

    #[test]
    fn test_writing_timestamp_is_read_back_as_timestamp() {
        let mut headers = RecordHeaders::new();
        let ts = Utc.timestamp_millis_opt(1_546_300_800_000).unwrap();
        add_header(&mut headers, "baz", ts).unwrap();

        assert_eq!(value_as_timestamp(&headers, "baz").unwrap(), Some(ts));
    }

    #[test]
    fn test_writing_scalars_keeps_sign_and_value() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "short", -123i16).unwrap();
        add_header(&mut headers, "int", 200i32).unwrap();
        add_header(&mut headers, "float", -1_234_567_890.0f32).unwrap();
        add_header(&mut headers, "double", 0.0f64).unwrap();

        assert_eq!(decode_short(raw(&headers, "short")).unwrap(), -123);
        assert_eq!(decode_int(raw(&headers, "int")).unwrap(), 200);
        assert_eq!(decode_float(raw(&headers, "float")).unwrap(), -1_234_567_890.0);
        assert_eq!(decode_double(raw(&headers, "double")).unwrap(), 0.0);
    }

    #[test]
    fn test_writing_big_integer_fails_without_mutating() {
        let mut headers = RecordHeaders::new();
        let result = add_header(&mut headers, "short", 0i128);

        assert!(matches!(result, Err(HeaderError::UnsupportedKind { .. })));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_writing_text_appends_one_header() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "foo", "a").unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.last_header("foo").unwrap().key(), "foo");
        assert_eq!(value_as_string(&headers, "foo").unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_writing_null_is_read_back_as_none() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "baz", HeaderValue::Null).unwrap();

        assert_eq!(value(&headers, "baz").unwrap(), None);
        assert!(headers.last_header("baz").is_some());
    }

    #[test]
    fn test_writing_custom_value_uses_display() {
        struct Foo {
            name: String,
            count: i32,
        }
        impl fmt::Display for Foo {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "Foo{{name='{}', bar=Bar{{count={}}}}}", self.name, self.count)
            }
        }

        let foo = Foo { name: "someName".to_string(), count: 100 };
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "object", HeaderValue::opaque(&foo)).unwrap();

        assert_eq!(
            value_as_string(&headers, "object").unwrap().as_deref(),
            Some("Foo{name='someName', bar=Bar{count=100}}")
        );
    }

    #[test]
    fn test_keys_returns_distinct_keys() {
        let mut headers = RecordHeaders::new();
        for key in ["a", "b", "c", "a"] {
            add_header(&mut headers, key, "someValue").unwrap();
        }

        let expected: BTreeSet<String> = ["a", "b", "c"].iter().map(|k| k.to_string()).collect();
        assert_eq!(keys(&headers).unwrap(), expected);
    }

    #[test]
    fn test_last_written_value_wins() {
        let mut headers = RecordHeaders::new();
        add_header(&mut headers, "k", 1i64).unwrap();
        add_header(&mut headers, "k", 2i64).unwrap();

        assert_eq!(value_as_long(&headers, "k").unwrap(), Some(2));
    }
}
