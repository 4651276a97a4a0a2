//! In-memory key-value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::planner::ports::{KeyValueResult, KeyValueStore, KeyValueStoreError};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same contents, so a test can hand one clone to the
/// planner and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            state: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the stored keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .state
            .read()
            .map(|state| state.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let state = self.state.read().map_err(|err| {
            KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(|err| {
            KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
        })?;
        state.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(|err| {
            KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
        })?;
        state.remove(key);
        Ok(())
    }
}
