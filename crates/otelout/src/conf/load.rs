//! Load — config loading from file and environment variables.

use std::path::Path;

use thiserror::Error;

use super::model::PluginConfig;

pub const CONFIG_FILE_ENV: &str = "OTELOUT_CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fluent-bit/otelout.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl PluginConfig {
    /// Load configuration from file, then apply environment overrides.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay `OTELOUT_*` variables; `lookup` abstracts the environment for tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("OTELOUT_PLUGIN_NAME") {
            self.name = name;
        }
        if let Some(prefix) = lookup("OTELOUT_RESOURCE_PREFIX") {
            self.attributes.resource_prefix = prefix;
        }
        if let Some(prefix) = lookup("OTELOUT_SCOPE_PREFIX") {
            self.attributes.scope_prefix = prefix;
        }
    }
}
