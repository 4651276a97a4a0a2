//! Planner configuration.
//!
//! Configuration is a small JSON document:
//!
//! ```json
//! { "data_dir": "planner-data", "seed_on_first_launch": true }
//! ```
//!
//! A relative `data_dir` is resolved against the directory holding the
//! configuration file.

use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::DefaultClock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planner::{
    adapters::file::JsonFileStore,
    ports::KeyValueStoreError,
    services::{StoreOptions, TaskStore},
};

/// Errors raised while loading configuration or opening its store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration path does not name a file.
    #[error("configuration path {0} has no file name")]
    NotAFile(Utf8PathBuf),

    /// The document is not a valid configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The data directory could not be opened.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
}

/// Settings of a file-backed planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    /// Directory holding one JSON document per partition.
    pub data_dir: Utf8PathBuf,
    /// Seed example tasks the first time the store is opened.
    #[serde(default = "seed_by_default")]
    pub seed_on_first_launch: bool,
}

const fn seed_by_default() -> bool {
    true
}

impl PlannerConfig {
    /// Creates a configuration storing data in `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed_on_first_launch: seed_by_default(),
        }
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid configuration.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::NotAFile(path.to_owned()))?;
        let parent = match path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir,
            _ => Utf8Path::new("."),
        };
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let document = dir.read_to_string(file_name).map_err(read_error)?;

        let mut config = Self::from_json_str(&document)?;
        if config.data_dir.is_relative() {
            config.data_dir = parent.join(&config.data_dir);
        }
        Ok(config)
    }

    /// Bootstrap options derived from this configuration.
    #[must_use]
    pub const fn store_options(&self) -> StoreOptions {
        StoreOptions {
            seed_on_first_launch: self.seed_on_first_launch,
        }
    }

    /// Opens the file-backed store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Store`] when the data directory cannot be
    /// created or opened.
    pub fn open_store(&self) -> Result<TaskStore<JsonFileStore, DefaultClock>, ConfigError> {
        let files = JsonFileStore::open(&self.data_dir)?;
        Ok(TaskStore::with_options(
            Arc::new(files),
            Arc::new(DefaultClock),
            self.store_options(),
        ))
    }
}
