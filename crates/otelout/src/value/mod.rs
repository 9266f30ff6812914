//! Value module — dynamic input model, structured output model, and the
//! converter between them.

pub mod convert;
pub mod dynamic;
pub mod structured;

pub use convert::{convert, convert_map, stringify_key};
pub use dynamic::{DynamicKey, DynamicMap, DynamicValue};
pub use structured::{KeyValue, StructuredValue};
