// Domain-driven module structure for the otelout output plugin.
//
// Fluent Bit records (untyped maps from the forward protocol) become
// OpenTelemetry log records.

// Core model
pub mod value;
pub mod record;
pub mod group;

// Boundaries
pub mod decode;
pub mod sink;

// Host-facing
pub mod plugin;
pub mod conf;
pub mod runtime;

pub use plugin::{FlushStatus, OutputPlugin};
pub use record::StructuredRecord;
pub use value::{DynamicValue, StructuredValue};
