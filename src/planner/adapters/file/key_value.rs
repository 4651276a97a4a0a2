//! Directory-backed key-value store.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::{Mutex, PoisonError};

use crate::planner::ports::{KeyValueResult, KeyValueStore, KeyValueStoreError};

const VALUE_EXTENSION: &str = "json";
const STAGING_EXTENSION: &str = "json.tmp";

/// Key-value store keeping one `<key>.json` file per key in a directory.
///
/// Access is confined to the directory through a capability handle. Values
/// are written to a staging file first and renamed into place, so readers
/// observe either the previous value or the new one.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: Dir,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Wraps an already opened directory.
    #[must_use]
    pub const fn new(dir: Dir) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the directory at `path`, creating it and its parents if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> KeyValueResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(KeyValueStoreError::backend)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(KeyValueStoreError::backend)?;
        Ok(Self::new(dir))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn file_name(key: &str, extension: &str) -> KeyValueResult<String> {
    let is_valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !is_valid {
        return Err(KeyValueStoreError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.{extension}"))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let name = file_name(key, VALUE_EXTENSION)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: String) -> KeyValueResult<()> {
        let name = file_name(key, VALUE_EXTENSION)?;
        let staging = file_name(key, STAGING_EXTENSION)?;
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.dir
            .write(&staging, value.as_bytes())
            .map_err(KeyValueStoreError::backend)?;
        self.dir
            .rename(&staging, &self.dir, &name)
            .map_err(KeyValueStoreError::backend)
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        let name = file_name(key, VALUE_EXTENSION)?;
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStoreError::backend(err)),
        }
    }
}
