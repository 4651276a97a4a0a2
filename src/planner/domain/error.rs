//! Error types for planner domain validation.

use thiserror::Error;

/// Errors returned while constructing planner domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A date key was empty after trimming.
    #[error("date key must not be empty")]
    EmptyDateKey,

    /// A task identifier could not be parsed.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),
}

/// Error returned while parsing a partition key from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown partition key: {0}")]
pub struct ParsePartitionKeyError(pub String);
