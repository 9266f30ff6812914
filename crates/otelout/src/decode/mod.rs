//! Decode module — the boundary to whatever turns a host buffer into records.
//!
//! The host's binary decoder lives outside this crate; [`RecordDecoder`] is
//! the seam. [`json::JsonLinesDecoder`] reads Fluent Bit's `json_lines`
//! event shape and backs the replay binary and the tests.

pub mod json;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value::DynamicMap;

pub use json::JsonLinesDecoder;

/// Event time as the decoder found it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventTime {
    /// A full time value (seconds + nanoseconds).
    Structured(DateTime<Utc>),
    /// Raw Unix seconds.
    UnixSeconds(u64),
    /// Anything else; resolved to "now".
    Invalid,
}

impl EventTime {
    /// Resolve to a UTC timestamp. `None` when the encoding is unusable and
    /// the caller should fall back to the current time.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match *self {
            EventTime::Structured(ts) => Some(ts),
            EventTime::UnixSeconds(secs) => {
                i64::try_from(secs).ok().and_then(|s| DateTime::from_timestamp(s, 0))
            }
            EventTime::Invalid => None,
        }
    }
}

/// One decoded `(time, record)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub time: EventTime,
    pub record: DynamicMap,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed event at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Invalid JSON at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Non-UTF8 buffer")]
    NonUtf8,
}

#[cfg_attr(test, mockall::automock)]
pub trait RecordDecoder: Send + Sync {
    /// Decode a whole host buffer into events, in stream order.
    fn decode(&self, buffer: &[u8]) -> Result<Vec<DecodedEvent>, DecodeError>;
}
