//! Typing of values written with [`Session::set`](crate::Session::set).

use crate::error::{Error, Result, ValueShape};
use crate::value::Value;
use bytes::Bytes;
use std::net::Ipv4Addr;

/// Type names accepted by [`ValueType::from_str`](std::str::FromStr).
pub const SUPPORTED_TYPES: &str =
    "Counter32, Counter64, Gauge32, Integer, Integer32, IpAddress, OctetString, TimeTicks, Unsigned32";

/// A host value to be written to an agent.
///
/// Without an explicit [`ValueType`], the protocol type is inferred from the
/// shape: integers and floats become `Integer` (floats truncated toward zero),
/// dotted-quad text becomes `IpAddress`, other text becomes `OctetString`.
/// Bytes and booleans require an explicit type.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    Integer(i128),
    Float(f64),
    Text(String),
    Bytes(Bytes),
    Bool(bool),
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SetValue {
                fn from(v: $t) -> Self {
                    SetValue::Integer(v as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f32> for SetValue {
    fn from(v: f32) -> Self {
        SetValue::Float(f64::from(v))
    }
}

impl From<f64> for SetValue {
    fn from(v: f64) -> Self {
        SetValue::Float(v)
    }
}

impl From<&str> for SetValue {
    fn from(v: &str) -> Self {
        SetValue::Text(v.to_owned())
    }
}

impl From<String> for SetValue {
    fn from(v: String) -> Self {
        SetValue::Text(v)
    }
}

impl From<Vec<u8>> for SetValue {
    fn from(v: Vec<u8>) -> Self {
        SetValue::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for SetValue {
    fn from(v: &[u8]) -> Self {
        SetValue::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Bytes> for SetValue {
    fn from(v: Bytes) -> Self {
        SetValue::Bytes(v)
    }
}

impl From<bool> for SetValue {
    fn from(v: bool) -> Self {
        SetValue::Bool(v)
    }
}

impl From<Ipv4Addr> for SetValue {
    fn from(v: Ipv4Addr) -> Self {
        SetValue::Text(v.to_string())
    }
}

/// Protocol type requested explicitly for a `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Counter32,
    Counter64,
    Gauge32,
    Integer,
    Integer32,
    IpAddress,
    OctetString,
    TimeTicks,
    Unsigned32,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Counter32 => "Counter32",
            ValueType::Counter64 => "Counter64",
            ValueType::Gauge32 => "Gauge32",
            ValueType::Integer => "Integer",
            ValueType::Integer32 => "Integer32",
            ValueType::IpAddress => "IpAddress",
            ValueType::OctetString => "OctetString",
            ValueType::TimeTicks => "TimeTicks",
            ValueType::Unsigned32 => "Unsigned32",
        }
    }

    /// Convert `value` to this protocol type.
    pub fn convert(self, value: &SetValue) -> Result<Value> {
        let name = self.name();
        match self {
            ValueType::Integer | ValueType::Integer32 => {
                Ok(Value::Integer(ranged(name, whole_number(name, value)?)?))
            }
            ValueType::Counter32 => Ok(Value::Counter32(ranged(name, whole_number(name, value)?)?)),
            ValueType::Gauge32 | ValueType::Unsigned32 => {
                Ok(Value::Gauge32(ranged(name, whole_number(name, value)?)?))
            }
            ValueType::TimeTicks => Ok(Value::TimeTicks(ranged(name, whole_number(name, value)?)?)),
            ValueType::Counter64 => Ok(Value::Counter64(ranged(name, whole_number(name, value)?)?)),
            ValueType::IpAddress => match value {
                SetValue::Text(s) => parse_ipv4(s)
                    .map(Value::IpAddress)
                    .ok_or_else(|| invalid(name, format!("'{}' is not an IPv4 address", s))),
                SetValue::Bytes(b) => <[u8; 4]>::try_from(b.as_ref())
                    .map(Value::IpAddress)
                    .map_err(|_| invalid(name, format!("expected 4 bytes, got {}", b.len()))),
                other => Err(invalid(name, format!("unsupported value {:?}", other))),
            },
            ValueType::OctetString => match value {
                SetValue::Text(s) => Ok(Value::from(s.as_str())),
                SetValue::Bytes(b) => Ok(Value::OctetString(b.clone())),
                other => Err(invalid(name, format!("unsupported value {:?}", other))),
            },
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ValueType {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Counter32" => Ok(ValueType::Counter32),
            "Counter64" => Ok(ValueType::Counter64),
            "Gauge32" => Ok(ValueType::Gauge32),
            "Integer" => Ok(ValueType::Integer),
            "Integer32" => Ok(ValueType::Integer32),
            "IpAddress" => Ok(ValueType::IpAddress),
            "OctetString" => Ok(ValueType::OctetString),
            "TimeTicks" => Ok(ValueType::TimeTicks),
            "Unsigned32" => Ok(ValueType::Unsigned32),
            _ => Err(Error::UnsupportedType {
                name: s.into(),
                supported: SUPPORTED_TYPES,
            }
            .boxed()),
        }
    }
}

/// Pick the protocol type for a value given without an explicit type.
pub fn infer(value: &SetValue) -> Result<Value> {
    match value {
        SetValue::Integer(_) | SetValue::Float(_) => ValueType::Integer.convert(value),
        SetValue::Text(s) if is_ipv4_address(s) => ValueType::IpAddress.convert(value),
        SetValue::Text(s) => Ok(Value::from(s.as_str())),
        SetValue::Bytes(_) => Err(cannot_infer(ValueShape::Bytes)),
        SetValue::Bool(_) => Err(cannot_infer(ValueShape::Bool)),
    }
}

/// Four dot-separated decimal parts, each in `0..=255`.
pub fn is_ipv4_address(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

fn parse_ipv4(s: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        *octet = parts.next()?.parse().ok()?;
    }
    parts.next().is_none().then_some(octets)
}

fn cannot_infer(shape: ValueShape) -> Box<Error> {
    Error::TypeInference {
        shape,
        supported: SUPPORTED_TYPES,
    }
    .boxed()
}

fn invalid(value_type: &'static str, reason: impl Into<Box<str>>) -> Box<Error> {
    Error::InvalidValue {
        value_type,
        reason: reason.into(),
    }
    .boxed()
}

fn whole_number(name: &'static str, value: &SetValue) -> Result<i128> {
    match value {
        SetValue::Integer(v) => Ok(*v),
        SetValue::Float(f) if f.is_finite() => Ok(f.trunc() as i128),
        SetValue::Float(f) => Err(invalid(name, format!("{} is not finite", f))),
        SetValue::Bool(b) => Ok(i128::from(*b)),
        SetValue::Text(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| invalid(name, format!("'{}' is not a number", s))),
        SetValue::Bytes(_) => Err(invalid(name, "bytes cannot be used as a number")),
    }
}

fn ranged<T: TryFrom<i128>>(name: &'static str, v: i128) -> Result<T> {
    T::try_from(v).map_err(|_| invalid(name, format!("{} is out of range", v)))
}
