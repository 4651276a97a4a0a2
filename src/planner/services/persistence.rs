//! JSON persistence of the planner partitions.

use crate::planner::{
    domain::{PartitionKey, ScheduledTasks, Task},
    ports::{KeyValueStore, KeyValueStoreError},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key of the "has ever launched" flag.
pub const FIRST_LAUNCH_KEY: &str = "isFirstLaunch";

/// Failures of a single save or load.
///
/// The planner never surfaces these to its callers: saves are best-effort
/// and loads fall back to empty partitions.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The value could not be encoded as JSON.
    #[error("failed to encode partition {key}: {source}")]
    Encode {
        /// Partition being saved.
        key: PartitionKey,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The stored document is not valid for the partition's shape.
    #[error("failed to decode partition {key}: {source}")]
    Decode {
        /// Partition being loaded.
        key: PartitionKey,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The key-value store failed.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
}

/// Contents of all four partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSnapshot {
    /// Open scheduled tasks.
    pub scheduled: ScheduledTasks,
    /// Open anytime tasks.
    pub anytime: Vec<Task>,
    /// Completed scheduled tasks.
    pub completed_scheduled: ScheduledTasks,
    /// Completed anytime tasks.
    pub completed_anytime: Vec<Task>,
}

/// Serializes partitions to, and hydrates them from, a [`KeyValueStore`].
#[derive(Debug)]
pub struct TaskPersistence<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
}

impl<S> Clone for TaskPersistence<S>
where
    S: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> TaskPersistence<S>
where
    S: KeyValueStore,
{
    /// Creates a persistence adapter over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encodes `value` and writes it under the partition's key.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when encoding or writing fails.
    pub fn try_save<T>(&self, key: PartitionKey, value: &T) -> Result<(), PersistenceError>
    where
        T: Serialize + ?Sized,
    {
        let encoded =
            serde_json::to_string(value).map_err(|source| PersistenceError::Encode { key, source })?;
        self.store.set(key.as_str(), encoded)?;
        Ok(())
    }

    /// Best-effort [`Self::try_save`]: failures are logged and dropped.
    pub fn save<T>(&self, key: PartitionKey, value: &T)
    where
        T: Serialize + ?Sized,
    {
        match self.try_save(key, value) {
            Ok(()) => debug!(partition = %key, "saved partition"),
            Err(err) => warn!(partition = %key, error = %err, "dropping failed partition save"),
        }
    }

    /// Reads and decodes the partition stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the store fails or the document does
    /// not decode as `T`.
    pub fn try_load<T>(&self, key: PartitionKey) -> Result<Option<T>, PersistenceError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Decode { key, source })
    }

    /// Lenient [`Self::try_load`]: any failure is logged and reads as absent.
    #[must_use]
    pub fn load<T>(&self, key: PartitionKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.try_load(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(partition = %key, error = %err, "ignoring unreadable partition");
                None
            }
        }
    }

    /// Loads a partition, falling back to its empty shape.
    #[must_use]
    pub fn load_or_default<T>(&self, key: PartitionKey) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.load(key).unwrap_or_default()
    }

    /// Loads all four partitions.
    #[must_use]
    pub fn load_snapshot(&self) -> PartitionSnapshot {
        PartitionSnapshot {
            scheduled: self.load_or_default(PartitionKey::Scheduled),
            anytime: self.load_or_default(PartitionKey::Anytime),
            completed_scheduled: self.load_or_default(PartitionKey::CompletedScheduled),
            completed_anytime: self.load_or_default(PartitionKey::CompletedAnytime),
        }
    }

    /// Returns whether the application has launched before.
    ///
    /// Only the presence of the flag matters. A store that cannot be read is
    /// treated as "launched" so that existing data is never reseeded.
    #[must_use]
    pub fn has_launched(&self) -> bool {
        match self.store.get(FIRST_LAUNCH_KEY) {
            Ok(flag) => flag.is_some(),
            Err(err) => {
                warn!(error = %err, "cannot read launch flag, assuming a previous launch");
                true
            }
        }
    }

    /// Records that the application has launched.
    pub fn mark_launched(&self) {
        if let Err(err) = self.store.set(FIRST_LAUNCH_KEY, false.to_string()) {
            warn!(error = %err, "dropping failed launch flag save");
        }
    }
}
