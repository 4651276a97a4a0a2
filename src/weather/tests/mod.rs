//! Unit tests for the weather module.
