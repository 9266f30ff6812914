//! Model — the OpenTelemetry-shaped log record produced per input record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::severity::Severity;
use crate::value::structured::serialize_key_values;
use crate::value::{KeyValue, StructuredValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredRecord {
    /// Event time as reported by the decoder.
    pub timestamp: DateTime<Utc>,

    /// When this process converted the record.
    pub observed_timestamp: DateTime<Utc>,

    /// Serialized as the OTel severity number.
    pub severity: Severity,

    pub severity_text: &'static str,

    pub body: StructuredValue,

    /// Resource attributes first, then scope attributes.
    #[serde(serialize_with = "serialize_key_values")]
    pub attributes: Vec<KeyValue>,
}

impl StructuredRecord {
    /// First attribute stored under `key`.
    pub fn attribute(&self, key: &str) -> Option<&StructuredValue> {
        self.attributes
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| &kv.value)
    }
}
