//! Attributes — flatten resource/scope context into prefixed key-values.

use crate::value::{convert, stringify_key, DynamicMap, KeyValue};

pub const RESOURCE_PREFIX: &str = "resource.";
pub const SCOPE_PREFIX: &str = "scope.";

/// One attribute per context entry, keyed `prefix + key`.
pub fn extract_attributes(context: &DynamicMap, prefix: &str) -> Vec<KeyValue> {
    let mut attrs = Vec::with_capacity(context.len());
    append_attributes(&mut attrs, context, prefix);
    attrs
}

/// Same as [`extract_attributes`], appending onto an existing list.
pub fn append_attributes(attrs: &mut Vec<KeyValue>, context: &DynamicMap, prefix: &str) {
    attrs.extend(
        context
            .iter()
            .map(|(k, v)| KeyValue::new(format!("{}{}", prefix, stringify_key(k)), convert(v))),
    );
}
