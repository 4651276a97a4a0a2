//! Unit tests for the planner module.

mod support;
