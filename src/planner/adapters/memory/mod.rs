//! In-memory adapters for the planner ports.

mod key_value;

pub use key_value::InMemoryKeyValueStore;
