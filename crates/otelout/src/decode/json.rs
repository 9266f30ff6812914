use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{DecodeError, DecodedEvent, EventTime, RecordDecoder};
use crate::value::{DynamicKey, DynamicMap, DynamicValue};

/// Decoder for one-event-per-line JSON.
///
/// Accepted line shapes:
/// - `[time, {record}]`
/// - `[[time, {metadata}], {record}]` (Fluent Bit v2 events; metadata is dropped)
///
/// `time` is Unix seconds as an unsigned integer, fractional seconds as a
/// float, or an RFC 3339 string. Anything else decodes as [`EventTime::Invalid`].
/// Blank lines are skipped.
#[derive(Debug, Default, Clone)]
pub struct JsonLinesDecoder;

impl JsonLinesDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonLinesDecoder {
    fn decode(&self, buffer: &[u8]) -> Result<Vec<DecodedEvent>, DecodeError> {
        let text = std::str::from_utf8(buffer).map_err(|_| DecodeError::NonUtf8)?;

        let mut events = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line)
                .map_err(|source| DecodeError::Json { line: line_no, source })?;
            events.push(decode_event(value, line_no)?);
        }
        Ok(events)
    }
}

fn decode_event(value: Value, line: usize) -> Result<DecodedEvent, DecodeError> {
    let malformed = |reason: &str| DecodeError::Malformed {
        line,
        reason: reason.to_string(),
    };

    let Value::Array(mut parts) = value else {
        return Err(malformed("event is not an array"));
    };
    if parts.len() != 2 {
        return Err(malformed("event must have exactly two elements"));
    }

    let record = match parts.pop() {
        Some(Value::Object(obj)) => obj
            .into_iter()
            .map(|(k, v)| (DynamicKey::Str(k), to_dynamic(v)))
            .collect::<DynamicMap>(),
        _ => return Err(malformed("record is not an object")),
    };

    let time = match parts.pop() {
        // v2 header: [time, metadata]
        Some(Value::Array(header)) => header.first().map(decode_time).unwrap_or(EventTime::Invalid),
        Some(other) => decode_time(&other),
        None => EventTime::Invalid,
    };

    Ok(DecodedEvent { time, record })
}

fn decode_time(value: &Value) -> EventTime {
    match value {
        Value::Number(n) => {
            if let Some(secs) = n.as_u64() {
                EventTime::UnixSeconds(secs)
            } else if let Some(secs) = n.as_f64().filter(|f| f.is_finite() && *f >= 0.0) {
                let whole = secs.trunc();
                let nanos = ((secs - whole) * 1_000_000_000.0) as u32;
                DateTime::from_timestamp(whole as i64, nanos)
                    .map(EventTime::Structured)
                    .unwrap_or(EventTime::Invalid)
            } else {
                EventTime::Invalid
            }
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| EventTime::Structured(dt.with_timezone(&Utc)))
            .unwrap_or(EventTime::Invalid),
        _ => EventTime::Invalid,
    }
}

/// JSON has no byte strings or non-string keys; arrays of small integers are
/// left as sequences for the converter's byte heuristic.
pub fn to_dynamic(value: Value) -> DynamicValue {
    match value {
        Value::Null => DynamicValue::Null,
        Value::Bool(b) => DynamicValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DynamicValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                DynamicValue::UInt(u)
            } else {
                DynamicValue::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => DynamicValue::Str(s),
        Value::Array(items) => DynamicValue::Seq(items.into_iter().map(to_dynamic).collect()),
        Value::Object(obj) => DynamicValue::Map(
            obj.into_iter()
                .map(|(k, v)| (DynamicKey::Str(k), to_dynamic(v)))
                .collect(),
        ),
    }
}
