//! Task-state engine of the planner.
//!
//! The engine keeps a user's to-do items in four partitions (open scheduled
//! tasks keyed by day, open anytime tasks, and their completed counterparts),
//! publishes every partition as an observable [`Relay`](crate::relay::Relay),
//! and writes each change back to a durable key-value store. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The store, its persistence and the completed view in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
