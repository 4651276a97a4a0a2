//! Step definitions for task planner behaviour scenarios.

pub mod world;

mod given;
mod then;
mod when;
