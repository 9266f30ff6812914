//! Runtime module — process bootstrap: logging and configuration.

pub mod boot;
