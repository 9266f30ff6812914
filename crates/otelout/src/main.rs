//! Replay a JSON-lines capture through the output plugin.
//!
//! Usage: `otelout [FILE]` (reads stdin without a file). `OTELOUT_SINK=json`
//! writes records to stdout as JSON lines instead of logging them.

use std::io::Read;

use otelout::decode::JsonLinesDecoder;
use otelout::runtime::boot;
use otelout::sink::{JsonLinesSink, RecordSink, TracingSink};
use otelout::{FlushStatus, OutputPlugin};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let config = boot::boot()?;

    let buffer = match std::env::args().nth(1) {
        Some(path) => std::fs::read(&path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let status = match std::env::var("OTELOUT_SINK").as_deref() {
        Ok("json") => replay(config, JsonLinesSink::new(std::io::stdout()), &buffer),
        _ => replay(config, TracingSink, &buffer),
    };

    if status == FlushStatus::Error {
        return Err("flush failed".into());
    }
    Ok(())
}

fn replay<S: RecordSink>(config: otelout::conf::PluginConfig, sink: S, buffer: &[u8]) -> FlushStatus {
    let plugin = OutputPlugin::new(config, JsonLinesDecoder::new(), sink);
    let registration = plugin.registration();
    tracing::info!("Registered {} ({})", registration.name, registration.description);

    if plugin.init() == FlushStatus::Error {
        return FlushStatus::Error;
    }
    let status = plugin.flush(buffer, "replay");
    plugin.exit();
    status
}
