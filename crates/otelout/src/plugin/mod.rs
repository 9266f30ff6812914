//! Plugin module — the host-facing output plugin: lifecycle, batch pipeline,
//! and flush metrics.

pub mod lifecycle;
pub mod metrics;
pub mod pipeline;

pub use lifecycle::{FlushStatus, OutputPlugin, Registration};
pub use metrics::{FlushMetrics, MetricsSnapshot};
pub use pipeline::process_batch;
