//! Sink module — where finished records go.
//!
//! A real OTLP exporter is outside this crate; [`RecordSink`] is the seam.

use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;
use tracing::info;

use crate::record::StructuredRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait RecordSink: Send + Sync {
    /// Take ownership of one flush worth of records.
    fn export(&self, records: Vec<StructuredRecord>) -> Result<(), SinkError>;
}

/// Keeps every exported record in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<StructuredRecord>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything collected so far.
    pub fn take(&self) -> Vec<StructuredRecord> {
        match self.records.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl RecordSink for CollectingSink {
    fn export(&self, records: Vec<StructuredRecord>) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Unavailable("collector lock poisoned".to_string()))?
            .extend(records);
        Ok(())
    }
}

/// Emits each record as a `tracing` event under the `otelout::record` target.
#[derive(Debug, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn export(&self, records: Vec<StructuredRecord>) -> Result<(), SinkError> {
        for record in &records {
            info!(
                target: "otelout::record",
                timestamp = %record.timestamp,
                severity = record.severity.number(),
                severity_text = record.severity_text,
                attributes = record.attributes.len(),
                body = %record.body,
                "OTel record"
            );
        }
        Ok(())
    }
}

/// Writes one JSON object per record.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn export(&self, records: Vec<StructuredRecord>) -> Result<(), SinkError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::Unavailable("writer lock poisoned".to_string()))?;
        for record in &records {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}
