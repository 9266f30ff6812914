//! Convert — total mapping from [`DynamicValue`] to [`StructuredValue`].
//!
//! Conversion never fails. Shapes with no structured counterpart degrade to an
//! empty string, non-text map keys collapse to `""`, and byte strings are read
//! as (lossy) UTF-8.

use super::dynamic::{byte_like, DynamicKey, DynamicMap, DynamicValue};
use super::structured::{KeyValue, StructuredValue};

/// Convert one decoded value.
pub fn convert(value: &DynamicValue) -> StructuredValue {
    match value {
        DynamicValue::Str(s) => StructuredValue::String(s.clone()),
        DynamicValue::Bytes(b) => StructuredValue::String(String::from_utf8_lossy(b).into_owned()),
        DynamicValue::Bool(b) => StructuredValue::Bool(*b),
        DynamicValue::Int(n) => StructuredValue::Int(*n),
        // 64-bit widening: values above i64::MAX wrap, same as any u64 -> i64 cast.
        DynamicValue::UInt(n) => StructuredValue::Int(*n as i64),
        DynamicValue::Float(x) => StructuredValue::Float(*x),
        DynamicValue::Map(m) => convert_map(m),
        DynamicValue::Seq(items) => convert_seq(items),
        DynamicValue::MapSeq(maps) => StructuredValue::Slice(maps.iter().map(convert_map).collect()),
        DynamicValue::Null => StructuredValue::String(String::new()),
    }
}

/// Convert a map into a key-value list, keeping entry order.
pub fn convert_map(map: &DynamicMap) -> StructuredValue {
    StructuredValue::Map(
        map.iter()
            .map(|(k, v)| KeyValue::new(stringify_key(k), convert(v)))
            .collect(),
    )
}

/// Map key as it appears in the structured model.
pub fn stringify_key(key: &DynamicKey) -> String {
    key.to_text()
}

// A sequence whose elements are all integers in 0..=255 is a byte string that
// the encoder wrote as an array. The check is vacuously true for `[]`, so an
// empty sequence becomes an empty string rather than an empty slice.
fn convert_seq(items: &[DynamicValue]) -> StructuredValue {
    match byte_like(items) {
        Some(bytes) => StructuredValue::String(String::from_utf8_lossy(&bytes).into_owned()),
        None => StructuredValue::Slice(items.iter().map(convert).collect()),
    }
}
