//! Lifecycle — the register / init / flush / exit contract a log-processing
//! host drives.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::metrics::FlushMetrics;
use super::pipeline::process_batch;
use crate::conf::PluginConfig;
use crate::decode::RecordDecoder;
use crate::record::RecordBuilder;
use crate::runtime::boot;
use crate::sink::RecordSink;

/// Result of a lifecycle call, as understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushStatus {
    /// Data processed.
    Ok,
    /// Unrecoverable; the host drops the chunk.
    Error,
    /// Transient; the host retries the chunk later.
    Retry,
}

impl FlushStatus {
    /// Fluent Bit return code (`FLB_ERROR = 0`, `FLB_OK = 1`, `FLB_RETRY = 2`).
    pub fn code(self) -> i32 {
        match self {
            FlushStatus::Error => 0,
            FlushStatus::Ok => 1,
            FlushStatus::Retry => 2,
        }
    }
}

/// Name and description handed to the host at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub description: String,
}

/// An output plugin instance.
///
/// Holds configuration, the decoder, the sink and metrics; no per-stream state.
/// Each `flush` runs on its own local group context, so concurrent flushes on
/// different buffers cannot see each other's resource/scope.
pub struct OutputPlugin<D, S> {
    config: PluginConfig,
    builder: RecordBuilder,
    decoder: D,
    sink: S,
    metrics: FlushMetrics,
}

impl<D: RecordDecoder, S: RecordSink> OutputPlugin<D, S> {
    pub fn new(config: PluginConfig, decoder: D, sink: S) -> Self {
        Self {
            builder: RecordBuilder::from_config(&config),
            config,
            decoder,
            sink,
            metrics: FlushMetrics::new(),
        }
    }

    pub fn registration(&self) -> Registration {
        Registration {
            name: self.config.name.clone(),
            description: self.config.description.clone(),
        }
    }

    /// Install logging (unless the host already did) and validate config.
    pub fn init(&self) -> FlushStatus {
        if !boot::init_logging() {
            debug!("Global tracing subscriber already installed");
        }
        if let Err(e) = self.config.validate() {
            error!("Invalid configuration for {}: {}", self.config.name, e);
            return FlushStatus::Error;
        }
        info!("Output plugin {} initialised", self.config.name);
        FlushStatus::Ok
    }

    /// Process one host buffer.
    pub fn flush(&self, buffer: &[u8], tag: &str) -> FlushStatus {
        let events = match self.decoder.decode(buffer) {
            Ok(events) => events,
            Err(e) => {
                error!(tag, "Failed to decode buffer ({} bytes): {}", buffer.len(), e);
                self.metrics.record_decode_error();
                return FlushStatus::Error;
            }
        };

        let records_in = events.len() as u64;
        let entries = events.into_iter().map(|event| {
            let timestamp = event.time.resolve().unwrap_or_else(|| {
                warn!(tag, time = ?event.time, "Time provided invalid, defaulting to now");
                self.metrics.record_invalid_timestamp();
                Utc::now()
            });
            (timestamp, event.record)
        });

        let records = process_batch(&self.builder, entries, Some(&self.metrics));
        self.metrics.record_flush(records_in);
        self.metrics.record_emitted(records.len() as u64);
        debug!(tag, records_in, records_out = records.len(), "Flush converted");

        if records.is_empty() {
            return FlushStatus::Ok;
        }

        match self.sink.export(records) {
            Ok(()) => FlushStatus::Ok,
            Err(e) => {
                warn!(tag, "Sink rejected records, asking host to retry: {}", e);
                self.metrics.record_sink_error();
                FlushStatus::Retry
            }
        }
    }

    pub fn exit(&self) -> FlushStatus {
        let snap = self.metrics.snapshot();
        info!(
            flushes = snap.flushes,
            records_in = snap.records_in,
            records_out = snap.records_out,
            decode_errors = snap.decode_errors,
            sink_errors = snap.sink_errors,
            "Output plugin {} exiting",
            self.config.name
        );
        FlushStatus::Ok
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn metrics(&self) -> &FlushMetrics {
        &self.metrics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeError, JsonLinesDecoder, MockRecordDecoder};
    use crate::record::Severity;
    use crate::sink::{CollectingSink, MockRecordSink, SinkError};
    use crate::value::StructuredValue;

    const GROUPED_BATCH: &str = r#"
[4294967295, {"resource": {"env": "prod"}, "scope": {"name": "svc"}}]
[1770385682.25, {"level": "error", "msg": "boom"}]
[4294967294, {}]
"#;

    fn plugin() -> OutputPlugin<JsonLinesDecoder, CollectingSink> {
        OutputPlugin::new(PluginConfig::default(), JsonLinesDecoder::new(), CollectingSink::new())
    }

    // ── Status codes ─────────────────────────────────────────────

    #[test]
    fn test_status_codes_match_host() {
        assert_eq!(FlushStatus::Error.code(), 0);
        assert_eq!(FlushStatus::Ok.code(), 1);
        assert_eq!(FlushStatus::Retry.code(), 2);
    }

    // ── Register / init / exit ───────────────────────────────────

    #[test]
    fn test_registration_uses_config() {
        let config = PluginConfig {
            name: "gstdout".to_string(),
            description: "Stdout".to_string(),
            ..Default::default()
        };
        let plugin = OutputPlugin::new(config, JsonLinesDecoder::new(), CollectingSink::new());
        assert_eq!(
            plugin.registration(),
            Registration {
                name: "gstdout".to_string(),
                description: "Stdout".to_string(),
            }
        );
    }

    #[test]
    fn test_init_and_exit_ok() {
        let plugin = plugin();
        assert_eq!(plugin.init(), FlushStatus::Ok);
        assert_eq!(plugin.exit(), FlushStatus::Ok);
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let config = PluginConfig {
            name: String::new(),
            ..Default::default()
        };
        let plugin = OutputPlugin::new(config, JsonLinesDecoder::new(), CollectingSink::new());
        assert_eq!(plugin.init(), FlushStatus::Error);
    }

    // ── Flush ────────────────────────────────────────────────────

    #[test]
    fn test_flush_grouped_batch() {
        let plugin = plugin();
        assert_eq!(plugin.flush(GROUPED_BATCH.as_bytes(), "test"), FlushStatus::Ok);

        let records = plugin.sink().take();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.severity_text, "ERROR");
        assert_eq!(record.body.get("msg"), Some(&StructuredValue::from("boom")));
        assert_eq!(record.attribute("resource.env"), Some(&StructuredValue::from("prod")));
        assert_eq!(record.attribute("scope.name"), Some(&StructuredValue::from("svc")));
        assert_eq!(record.timestamp.timestamp(), 1_770_385_682);
        assert_eq!(record.timestamp.timestamp_subsec_millis(), 250);

        let snap = plugin.metrics().snapshot();
        assert_eq!(snap.flushes, 1);
        assert_eq!(snap.records_in, 3);
        assert_eq!(snap.records_out, 1);
        assert_eq!(snap.groups_started, 1);
        assert_eq!(snap.groups_ended, 1);
    }

    #[test]
    fn test_flush_does_not_carry_group_into_next_flush() {
        let plugin = plugin();
        let open_group = r#"[1, {"resource": {"env": "prod"}, "scope": {}}]
[2, {"msg": "first"}]"#;
        assert_eq!(plugin.flush(open_group.as_bytes(), "t"), FlushStatus::Ok);
        assert_eq!(plugin.flush(br#"[3, {"msg": "second"}]"#, "t"), FlushStatus::Ok);

        let records = plugin.sink().take();
        assert_eq!(records.len(), 2);
        assert!(records[0].attribute("resource.env").is_some());
        assert!(records[1].attributes.is_empty());
    }

    #[test]
    fn test_flush_invalid_time_defaults_to_now() {
        let plugin = plugin();
        let before = Utc::now();
        assert_eq!(plugin.flush(br#"["not-a-time", {"msg": "x"}]"#, "t"), FlushStatus::Ok);

        let records = plugin.sink().take();
        assert!(records[0].timestamp >= before);
        assert_eq!(plugin.metrics().snapshot().invalid_timestamps, 1);
    }

    #[test]
    fn test_flush_empty_buffer_is_ok() {
        let plugin = plugin();
        assert_eq!(plugin.flush(b"", "t"), FlushStatus::Ok);
        assert!(plugin.sink().take().is_empty());
    }

    #[test]
    fn test_flush_decode_error_is_error() {
        let plugin = plugin();
        assert_eq!(plugin.flush(b"not json", "t"), FlushStatus::Error);
        assert_eq!(plugin.metrics().snapshot().decode_errors, 1);
    }

    #[test]
    fn test_flush_uses_decoder_seam() {
        let mut decoder = MockRecordDecoder::new();
        decoder
            .expect_decode()
            .times(1)
            .returning(|_| Err(DecodeError::NonUtf8));

        let plugin = OutputPlugin::new(PluginConfig::default(), decoder, CollectingSink::new());
        assert_eq!(plugin.flush(b"\x00", "t"), FlushStatus::Error);
    }

    #[test]
    fn test_flush_sink_failure_asks_for_retry() {
        let mut sink = MockRecordSink::new();
        sink.expect_export()
            .times(1)
            .returning(|_| Err(SinkError::Unavailable("collector down".to_string())));

        let plugin = OutputPlugin::new(PluginConfig::default(), JsonLinesDecoder::new(), sink);
        assert_eq!(plugin.flush(br#"[1, {"msg": "x"}]"#, "t"), FlushStatus::Retry);
        assert_eq!(plugin.metrics().snapshot().sink_errors, 1);
    }

    #[test]
    fn test_flush_passes_every_record_to_sink() {
        let mut sink = MockRecordSink::new();
        sink.expect_export()
            .withf(|records| records.len() == 2 && records.iter().all(|r| r.severity == Severity::Warn))
            .times(1)
            .returning(|_| Ok(()));

        let plugin = OutputPlugin::new(PluginConfig::default(), JsonLinesDecoder::new(), sink);
        let batch = "[1, {\"lvl\": \"warning\"}]\n[2, {\"loglevel\": \"WARN\"}]";
        assert_eq!(plugin.flush(batch.as_bytes(), "t"), FlushStatus::Ok);
    }

    #[test]
    fn test_flush_honours_configured_prefixes() {
        let mut config = PluginConfig::default();
        config.attributes.resource_prefix = "res.".to_string();
        let plugin = OutputPlugin::new(config, JsonLinesDecoder::new(), CollectingSink::new());

        plugin.flush(GROUPED_BATCH.as_bytes(), "t");
        let records = plugin.sink().take();
        assert!(records[0].attribute("res.env").is_some());
        assert!(records[0].attribute("resource.env").is_none());
    }
}
