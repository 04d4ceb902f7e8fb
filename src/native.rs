//! Conversion of protocol values into plain Rust values.
//!
//! Every [`Value`] the engine hands back is normalized into a [`NativeValue`]
//! before it reaches the caller. Normalization never fails: anything without a
//! natural host representation is passed through as [`NativeValue::Raw`].
//!
//! ```
//! use snmp_table::{NativeValue, Value, native::normalize};
//! use std::time::Duration;
//!
//! assert_eq!(normalize(&Value::Counter32(42)), NativeValue::Integer(42));
//! assert_eq!(normalize(&Value::IpAddress([10, 0, 0, 1])), NativeValue::from("10.0.0.1"));
//! assert_eq!(normalize(&Value::TimeTicks(150)), NativeValue::Duration(Duration::from_millis(1500)));
//! ```

use crate::format;
use crate::value::Value;
use bytes::Bytes;
use std::time::Duration;

/// A normalized, host-native value.
///
/// Equality and hashing are structural, so values can key frequency maps and
/// substitution tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeValue {
    /// Any protocol integer. Wide enough for both `Integer32` and `Counter64`.
    Integer(i128),
    /// Successfully decoded text.
    Text(String),
    /// Bytes that did not decode under the session's text encoding.
    Bytes(Bytes),
    /// Elapsed time from `TimeTicks`.
    Duration(Duration),
    /// Value with no host mapping, passed through unchanged.
    Raw(Value),
}

impl NativeValue {
    /// Integer content, if any.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            NativeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Undecoded byte content, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            NativeValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Duration content, if any.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            NativeValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// The passed-through protocol value, if any.
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            NativeValue::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this wraps a `noSuchObject`, `noSuchInstance` or `endOfMibView`.
    pub fn is_exception(&self) -> bool {
        matches!(self, NativeValue::Raw(v) if v.is_exception())
    }
}

impl std::fmt::Display for NativeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeValue::Integer(v) => write!(f, "{}", v),
            NativeValue::Text(s) => write!(f, "{}", s),
            NativeValue::Bytes(b) => write!(f, "0x{}", format::hex::Bytes(b)),
            NativeValue::Duration(d) => write!(f, "{:?}", d),
            NativeValue::Raw(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NativeValue {
                fn from(v: $t) -> Self {
                    NativeValue::Integer(v as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Text(s.to_owned())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Text(s)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(b: Vec<u8>) -> Self {
        NativeValue::Bytes(Bytes::from(b))
    }
}

impl From<Duration> for NativeValue {
    fn from(d: Duration) -> Self {
        NativeValue::Duration(d)
    }
}

/// Character encoding used to decode OCTET STRING payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextEncoding {
    /// Strict UTF-8.
    #[default]
    Utf8,
    /// 7-bit ASCII; any byte above 0x7f fails decoding.
    Ascii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Decode bytes, or `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// Converts protocol values to [`NativeValue`] under a fixed text encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    encoding: TextEncoding,
}

impl Normalizer {
    /// Normalizer decoding text with `encoding`.
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// The text encoding in use.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Normalize a single value. Total; never fails.
    pub fn normalize(&self, value: &Value) -> NativeValue {
        match value {
            Value::Integer(v) => NativeValue::Integer(*v as i128),
            Value::Counter32(v) | Value::Gauge32(v) => NativeValue::Integer(*v as i128),
            Value::Counter64(v) => NativeValue::Integer(*v as i128),
            Value::IpAddress(addr) => NativeValue::Text(format::ipv4_address(addr)),
            Value::OctetString(data) | Value::Opaque(data) => match self.encoding.decode(data) {
                Some(text) => NativeValue::Text(text),
                None => NativeValue::Bytes(data.clone()),
            },
            Value::TimeTicks(ticks) => {
                NativeValue::Duration(Duration::from_millis(u64::from(*ticks) * 10))
            }
            other => NativeValue::Raw(other.clone()),
        }
    }
}

/// Normalize with the default (UTF-8) text encoding.
pub fn normalize(value: &Value) -> NativeValue {
    Normalizer::default().normalize(value)
}
