//! Model — PluginConfig and related structs.

use serde::{Deserialize, Serialize};

use crate::record::attributes::{RESOURCE_PREFIX, SCOPE_PREFIX};
use crate::record::severity::DEFAULT_SEVERITY_KEYS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Name the plugin registers under.
    pub name: String,
    pub description: String,
    pub attributes: AttributeConfig,
    pub severity: SeverityConfig,
}

/// Prefixes for flattened group context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    pub resource_prefix: String,
    pub scope_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityConfig {
    /// Level keys, highest priority first.
    pub keys: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: "otelout".to_string(),
            description: "Fluent Bit records as OpenTelemetry logs".to_string(),
            attributes: AttributeConfig::default(),
            severity: SeverityConfig::default(),
        }
    }
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            resource_prefix: RESOURCE_PREFIX.to_string(),
            scope_prefix: SCOPE_PREFIX.to_string(),
        }
    }
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_SEVERITY_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl PluginConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        self.severity.validate()
    }
}

impl SeverityConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.keys.is_empty() {
            return Err("severity.keys must list at least one key".to_string());
        }
        if self.keys.iter().any(|k| k.is_empty()) {
            return Err("severity.keys must not contain empty keys".to_string());
        }
        Ok(())
    }
}
