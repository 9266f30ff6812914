//! Structured — the closed value model of an OpenTelemetry log body/attribute.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// An OpenTelemetry `AnyValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Slice(Vec<StructuredValue>),
    /// Ordered key-value list. Duplicate keys are kept.
    Map(Vec<KeyValue>),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: StructuredValue,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: StructuredValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl StructuredValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StructuredValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[KeyValue]> {
        match self {
            StructuredValue::Map(kvs) => Some(kvs.as_slice()),
            _ => None,
        }
    }

    /// First value stored under `key` when this is a map.
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        self.as_map()?
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| &kv.value)
    }
}

impl From<&str> for StructuredValue {
    fn from(s: &str) -> Self {
        StructuredValue::String(s.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(s: String) -> Self {
        StructuredValue::String(s)
    }
}

impl From<i64> for StructuredValue {
    fn from(n: i64) -> Self {
        StructuredValue::Int(n)
    }
}

impl From<bool> for StructuredValue {
    fn from(b: bool) -> Self {
        StructuredValue::Bool(b)
    }
}

impl From<f64> for StructuredValue {
    fn from(f: f64) -> Self {
        StructuredValue::Float(f)
    }
}

/// Compact human-readable form, used in log lines.
impl fmt::Display for StructuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuredValue::Bool(b) => write!(f, "{}", b),
            StructuredValue::Int(n) => write!(f, "{}", n),
            StructuredValue::Float(x) => write!(f, "{:.6}", x),
            StructuredValue::String(s) => f.write_str(s),
            StructuredValue::Slice(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            StructuredValue::Map(kvs) => {
                f.write_str("{")?;
                for (i, kv) in kvs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", kv.key, kv.value)?;
                }
                f.write_str("}")
            }
            StructuredValue::Empty => f.write_str("<empty>"),
        }
    }
}

// Maps serialize as objects in entry order; duplicate keys are written as-is.
impl Serialize for StructuredValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StructuredValue::Bool(b) => serializer.serialize_bool(*b),
            StructuredValue::Int(n) => serializer.serialize_i64(*n),
            StructuredValue::Float(x) => serializer.serialize_f64(*x),
            StructuredValue::String(s) => serializer.serialize_str(s),
            StructuredValue::Slice(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StructuredValue::Map(kvs) => serialize_key_values(kvs, serializer),
            StructuredValue::Empty => serializer.serialize_unit(),
        }
    }
}

/// Serialize a key-value list as a map. Also used for record attributes.
pub fn serialize_key_values<S>(kvs: &[KeyValue], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(kvs.len()))?;
    for kv in kvs {
        map.serialize_entry(&kv.key, &kv.value)?;
    }
    map.end()
}
