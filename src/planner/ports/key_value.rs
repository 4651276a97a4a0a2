//! Durable string-keyed storage port.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueResult<T> = Result<T, KeyValueStoreError>;

/// A durable store of string values under string keys.
///
/// The planner persists each partition as one JSON document, so the store
/// never needs to understand the values it holds.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been stored under the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> KeyValueResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the key is rejected or the backend
    /// cannot be written.
    fn set(&self, key: &str, value: String) -> KeyValueResult<()>;

    /// Deletes the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> KeyValueResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// The key cannot be represented by the backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
