//! Adapter implementations for planner ports.

pub mod file;
pub mod memory;
