//! Key-value persistence adapters.
//!
//! The tour machine persists progress through the [`ProgressStore`]
//! contract: string keys, string values, last-write-wins, no atomicity
//! guarantees. Exactly one UI context writes at a time, so that is enough.
//!
//! Read failures are the adapter's problem: `get` collapses them to
//! "absent" so callers only ever see a value or nothing. Write failures are
//! reported, and the machine decides what to do with them (it discards
//! them; losing progress is acceptable, losing the session is not).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a store can report from a write.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be reached or prepared.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The storage refused the write (quota, permissions, I/O).
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// String-keyed persistence used for tour progress.
pub trait ProgressStore {
    /// Read a value. Absent keys and failed reads both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key, best-effort. Removing an absent key is not an error.
    fn remove(&mut self, key: &str);
}

/// In-memory store. The default for tests and for hosts that bridge
/// persistence themselves (e.g. hand the serialized value to a browser's
/// storage API).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// File-backed store: one file per key inside a directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous value intact rather than a torn one.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are caller-chosen; flatten anything path-hostile.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl ProgressStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let path = self.path_for(key);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, value).map_err(|e| StoreError::Rejected(e.to_string()))?;
        fs::rename(&temp, &path).map_err(|e| StoreError::Rejected(e.to_string()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}
