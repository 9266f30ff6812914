//! Boot — logging init and config load.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{ConfigError, PluginConfig};

/// Initialise the tracing / logging subsystem.
///
/// Returns `false` when a global subscriber was already installed (e.g. by
/// the host process or a previous `init`); the existing one is kept.
pub fn init_logging() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otelout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

/// Load and validate the plugin configuration.
pub fn boot() -> Result<PluginConfig, ConfigError> {
    info!("Starting otelout v{}", env!("CARGO_PKG_VERSION"));

    let config = PluginConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        "Loaded configuration: name={}, severity_keys={:?}",
        config.name, config.severity.keys
    );
    info!(
        "Attribute prefixes: resource={:?}, scope={:?}",
        config.attributes.resource_prefix, config.attributes.scope_prefix
    );

    Ok(config)
}
