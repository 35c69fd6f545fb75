use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use super::errors::{HeaderError, HeaderResult};

// ============================================================================
// Scalar Codec - typed header values <-> canonical byte layouts
// ============================================================================
//
// Wire layouts (big-endian, no type tag on the wire):
// - Short:             2 bytes
// - Int / Float:       4 bytes
// - Long / Double:     8 bytes
// - Timestamp:         epoch millis, same 8 bytes as Long
// - Text / Opaque:     UTF-8
// - Null:              absent value (not zero bytes)
//
// The reader has to know which type it expects.
//
// ============================================================================

/// A metadata or envelope value that can be written into a header
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Null,
    Text(String),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Timestamp(DateTime<Utc>),
    /// Canonical text rendering of an arbitrary object
    Opaque(String),
    // Numeric kinds outside the wire set. Kept representable so they are
    // rejected explicitly instead of being stringified.
    Byte(i8),
    Unsigned(u64),
    BigInteger(i128),
}

/// Explicit kind tag for a `HeaderValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Text,
    Short,
    Int,
    Long,
    Float,
    Double,
    Timestamp,
    Opaque,
    Byte,
    Unsigned,
    BigInteger,
}

impl ValueKind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, ValueKind::Byte | ValueKind::Unsigned | ValueKind::BigInteger)
    }
}

impl HeaderValue {
    /// Wrap any displayable object as an opaque text value
    pub fn opaque(value: &impl fmt::Display) -> Self {
        HeaderValue::Opaque(value.to_string())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            HeaderValue::Null => ValueKind::Null,
            HeaderValue::Text(_) => ValueKind::Text,
            HeaderValue::Short(_) => ValueKind::Short,
            HeaderValue::Int(_) => ValueKind::Int,
            HeaderValue::Long(_) => ValueKind::Long,
            HeaderValue::Float(_) => ValueKind::Float,
            HeaderValue::Double(_) => ValueKind::Double,
            HeaderValue::Timestamp(_) => ValueKind::Timestamp,
            HeaderValue::Opaque(_) => ValueKind::Opaque,
            HeaderValue::Byte(_) => ValueKind::Byte,
            HeaderValue::Unsigned(_) => ValueKind::Unsigned,
            HeaderValue::BigInteger(_) => ValueKind::BigInteger,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HeaderValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) | HeaderValue::Opaque(s) => Some(s),
            _ => None,
        }
    }
}

/// Encode a value for the header `key`.
///
/// Returns `Ok(None)` for `Null` and fails with `UnsupportedKind` for numeric
/// kinds outside the wire set.
pub fn encode_value(key: &str, value: &HeaderValue) -> HeaderResult<Option<Vec<u8>>> {
    let bytes = match value {
        HeaderValue::Null => return Ok(None),
        HeaderValue::Short(v) => v.to_be_bytes().to_vec(),
        HeaderValue::Int(v) => v.to_be_bytes().to_vec(),
        HeaderValue::Long(v) => v.to_be_bytes().to_vec(),
        HeaderValue::Float(v) => v.to_be_bytes().to_vec(),
        HeaderValue::Double(v) => v.to_be_bytes().to_vec(),
        HeaderValue::Timestamp(ts) => ts.timestamp_millis().to_be_bytes().to_vec(),
        HeaderValue::Text(s) | HeaderValue::Opaque(s) => s.as_bytes().to_vec(),
        HeaderValue::Byte(_) | HeaderValue::Unsigned(_) | HeaderValue::BigInteger(_) => {
            return Err(HeaderError::UnsupportedKind {
                key: key.to_string(),
                kind: value.kind(),
            });
        }
    };
    Ok(Some(bytes))
}

fn fixed<const N: usize>(bytes: &[u8], kind: ValueKind) -> HeaderResult<[u8; N]> {
    bytes.try_into().map_err(|_| HeaderError::InvalidWidth {
        kind,
        expected: N,
        actual: bytes.len(),
    })
}

pub fn decode_short(bytes: &[u8]) -> HeaderResult<i16> {
    Ok(i16::from_be_bytes(fixed(bytes, ValueKind::Short)?))
}

pub fn decode_int(bytes: &[u8]) -> HeaderResult<i32> {
    Ok(i32::from_be_bytes(fixed(bytes, ValueKind::Int)?))
}

pub fn decode_long(bytes: &[u8]) -> HeaderResult<i64> {
    Ok(i64::from_be_bytes(fixed(bytes, ValueKind::Long)?))
}

pub fn decode_float(bytes: &[u8]) -> HeaderResult<f32> {
    Ok(f32::from_be_bytes(fixed(bytes, ValueKind::Float)?))
}

pub fn decode_double(bytes: &[u8]) -> HeaderResult<f64> {
    Ok(f64::from_be_bytes(fixed(bytes, ValueKind::Double)?))
}

pub fn decode_text(bytes: &[u8]) -> HeaderResult<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// UTF-8 decode that never fails; invalid sequences become U+FFFD.
///
/// Numeric and timestamp values are raw big-endian bytes, so reading them as
/// text without knowing their type needs this.
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Timestamps travel as epoch millis, so sub-millisecond precision is lost.
pub fn decode_timestamp(bytes: &[u8]) -> HeaderResult<DateTime<Utc>> {
    let millis = i64::from_be_bytes(fixed(bytes, ValueKind::Timestamp)?);
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or(HeaderError::TimestampOutOfRange(millis))
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Null => write!(f, "null"),
            HeaderValue::Text(s) | HeaderValue::Opaque(s) => write!(f, "{}", s),
            HeaderValue::Short(v) => write!(f, "{}", v),
            HeaderValue::Int(v) => write!(f, "{}", v),
            HeaderValue::Long(v) => write!(f, "{}", v),
            HeaderValue::Float(v) => write!(f, "{}", v),
            HeaderValue::Double(v) => write!(f, "{}", v),
            HeaderValue::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            HeaderValue::Byte(v) => write!(f, "{}", v),
            HeaderValue::Unsigned(v) => write!(f, "{}", v),
            HeaderValue::BigInteger(v) => write!(f, "{}", v),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for HeaderValue {
                fn from(value: $ty) -> Self {
                    HeaderValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from! {
    String => Text,
    &str => Text,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    i128 => BigInteger,
    u8 => Unsigned,
    u16 => Unsigned,
    u32 => Unsigned,
    u64 => Unsigned,
    f32 => Float,
    f64 => Double,
    DateTime<Utc> => Timestamp,
}

impl<T: Into<HeaderValue>> From<Option<T>> for HeaderValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(HeaderValue::Null)
    }
}
