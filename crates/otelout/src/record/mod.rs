//! Record module — severity classification, attribute extraction, and the
//! builder that turns a decoded record into a [`StructuredRecord`].

pub mod attributes;
pub mod builder;
pub mod model;
pub mod severity;

pub use attributes::extract_attributes;
pub use builder::RecordBuilder;
pub use model::StructuredRecord;
pub use severity::{Severity, SeverityClassifier};
