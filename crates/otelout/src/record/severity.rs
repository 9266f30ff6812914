//! Severity — OpenTelemetry severity numbers and the level classifier.
//!
//! The classifier walks a priority-ordered list of level key aliases; the
//! alias list, not map order, decides which key is consulted.

use serde::{Serialize, Serializer};

use crate::value::DynamicMap;

/// Level keys consulted by default, highest priority first.
pub const DEFAULT_SEVERITY_KEYS: [&str; 5] = ["level", "severity", "log_level", "loglevel", "lvl"];

/// OpenTelemetry severity number (1–24), four sub-levels per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Trace = 1,
    Trace2,
    Trace3,
    Trace4,
    Debug,
    Debug2,
    Debug3,
    Debug4,
    Info,
    Info2,
    Info3,
    Info4,
    Warn,
    Warn2,
    Warn3,
    Warn4,
    Error,
    Error2,
    Error3,
    Error4,
    Fatal,
    Fatal2,
    Fatal3,
    Fatal4,
}

impl Severity {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Canonical text; all four sub-levels share their name's word.
    pub fn text(self) -> &'static str {
        match self {
            Severity::Trace | Severity::Trace2 | Severity::Trace3 | Severity::Trace4 => "TRACE",
            Severity::Debug | Severity::Debug2 | Severity::Debug3 | Severity::Debug4 => "DEBUG",
            Severity::Info | Severity::Info2 | Severity::Info3 | Severity::Info4 => "INFO",
            Severity::Warn | Severity::Warn2 | Severity::Warn3 | Severity::Warn4 => "WARN",
            Severity::Error | Severity::Error2 | Severity::Error3 | Severity::Error4 => "ERROR",
            Severity::Fatal | Severity::Fatal2 | Severity::Fatal3 | Severity::Fatal4 => "FATAL",
        }
    }

    /// Map a level word to a severity. Unknown words are `Info`.
    pub fn parse_level(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "trace" => Severity::Trace,
            "debug" => Severity::Debug,
            "info" | "information" => Severity::Info,
            "warn" | "warning" => Severity::Warn,
            "error" | "err" => Severity::Error,
            "fatal" | "critical" | "panic" | "emergency" => Severity::Fatal,
            _ => Severity::Info,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

/// Picks a record's severity from the first level alias it carries.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    keys: Vec<String>,
}

impl SeverityClassifier {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Classify a record. Non-text level values stringify to `""` and land on `Info`.
    pub fn classify(&self, record: &DynamicMap) -> (Severity, &'static str) {
        let severity = self
            .keys
            .iter()
            .find_map(|key| record.get(key))
            .map(|value| Severity::parse_level(&value.to_text()))
            .unwrap_or_default();
        (severity, severity.text())
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SEVERITY_KEYS.iter().map(|k| k.to_string()).collect())
    }
}
