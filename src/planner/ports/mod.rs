//! Port contracts for the task planner.
//!
//! Ports define infrastructure-agnostic interfaces used by planner services.

pub mod edit_sink;
pub mod key_value;

pub use edit_sink::TaskEditSink;
pub use key_value::{KeyValueResult, KeyValueStore, KeyValueStoreError};

#[cfg(test)]
pub use key_value::MockKeyValueStore;
