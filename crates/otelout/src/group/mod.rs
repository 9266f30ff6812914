//! Group module — resource/scope context threaded across a record stream.

pub mod state;

pub use state::{GroupContext, GroupState, Step};
