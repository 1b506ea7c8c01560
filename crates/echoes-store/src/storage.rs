//! Key-value storage adapters.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// A durable string slot per key.
pub trait KeyValueStorage {
    /// Reads the value stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory storage, for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one pre-populated slot.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Raw slot contents, for assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage: each key is a `<key>.json` file.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the slot, so readers never observe a partial document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| PersistenceError::io(&root, e))?;
        Ok(Self { root })
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        if !is_valid_key(key) {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(key)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| PersistenceError::io(&self.root, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| PersistenceError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| PersistenceError::io(&path, e.error))?;
        Ok(())
    }
}

/// Keys become file names: ASCII alphanumerics, `-`, `_`, `.`, not
/// starting with a dot.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("slot").unwrap(), None);
        storage.set("slot", "[]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.raw("slot"), Some("[]"));
    }

    #[test]
    fn test_file_storage_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("emotional-echoes-compositions").unwrap(), None);
    }

    #[test]
    fn test_file_storage_overwrites_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path().join("nested")).unwrap();

        storage.set("slot", "first").unwrap();
        storage.set("slot", "second").unwrap();

        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("second"));
        let on_disk = fs::read_to_string(dir.path().join("nested").join("slot.json")).unwrap();
        assert_eq!(on_disk, "second");

        // Only the slot file remains; no temporaries left behind.
        let entries = fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(PersistenceError::InvalidKey(_))
            ));
        }
    }
}
