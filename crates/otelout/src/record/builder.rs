//! Builder — assembles one [`StructuredRecord`] from a decoded record and the
//! active group context.

use chrono::{DateTime, Utc};

use super::attributes::{append_attributes, RESOURCE_PREFIX, SCOPE_PREFIX};
use super::model::StructuredRecord;
use super::severity::SeverityClassifier;
use crate::conf::PluginConfig;
use crate::group::GroupContext;
use crate::value::{convert_map, DynamicMap};

#[derive(Debug, Clone)]
pub struct RecordBuilder {
    classifier: SeverityClassifier,
    resource_prefix: String,
    scope_prefix: String,
}

impl RecordBuilder {
    pub fn new(classifier: SeverityClassifier, resource_prefix: String, scope_prefix: String) -> Self {
        Self {
            classifier,
            resource_prefix,
            scope_prefix,
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(
            SeverityClassifier::new(config.severity.keys.clone()),
            config.attributes.resource_prefix.clone(),
            config.attributes.scope_prefix.clone(),
        )
    }

    /// Build the output record. Always succeeds.
    pub fn build(
        &self,
        timestamp: DateTime<Utc>,
        record: &DynamicMap,
        context: &GroupContext,
    ) -> StructuredRecord {
        let (severity, severity_text) = self.classifier.classify(record);

        let mut attributes = Vec::new();
        if let Some(resource) = &context.resource {
            append_attributes(&mut attributes, resource, &self.resource_prefix);
        }
        if let Some(scope) = &context.scope {
            append_attributes(&mut attributes, scope, &self.scope_prefix);
        }

        StructuredRecord {
            timestamp,
            observed_timestamp: Utc::now(),
            severity,
            severity_text,
            body: convert_map(record),
            attributes,
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(
            SeverityClassifier::default(),
            RESOURCE_PREFIX.to_string(),
            SCOPE_PREFIX.to_string(),
        )
    }
}
