//! Key/value storage for persisted client state
//!
//! Two flavours mirror the browser storages the client relies on: a durable
//! store that survives restarts ([`FileStore`]) and a session-scoped one
//! ([`MemoryStore`], or a [`FileStore`] placed in the temp directory).
//! Each single-key operation is atomic.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Minimal string key/value store
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a key-value pair
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key; deleting a missing key is not an error
    fn delete(&self, key: &str) -> StorageResult<()>;
}

/// In-process store, gone when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk
///
/// The whole file is rewritten on every change through a temp file and a
/// rename, so readers never see a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store for the given file; the file is created lazily
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StorageError::Corrupt),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(entries).map_err(StorageError::Corrupt)?;
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) -> StorageResult<()> {
        assert_eq!(store.get("accessToken")?, None);

        store.set("accessToken", "token-1")?;
        assert_eq!(store.get("accessToken")?, Some("token-1".to_string()));

        store.set("accessToken", "token-2")?;
        assert_eq!(store.get("accessToken")?, Some("token-2".to_string()));

        store.delete("accessToken")?;
        assert_eq!(store.get("accessToken")?, None);

        // Deleting twice is fine
        store.delete("accessToken")?;
        Ok(())
    }

    #[test]
    fn test_memory_store() -> StorageResult<()> {
        exercise(&MemoryStore::new())
    }

    #[test]
    fn test_file_store() -> StorageResult<()> {
        let dir = TempDir::new()?;
        exercise(&FileStore::new(dir.path().join("nested").join("storage.json")))
    }

    #[test]
    fn test_file_store_persists_across_instances() -> StorageResult<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("storage.json");

        FileStore::new(&path).set("user", r#"{"id":"u1"}"#)?;
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("user")?, Some(r#"{"id":"u1"}"#.to_string()));
        Ok(())
    }

    #[test]
    fn test_file_store_corrupt_file() -> StorageResult<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json")?;

        let store = FileStore::new(&path);
        assert!(matches!(store.get("user"), Err(StorageError::Corrupt(_))));
        Ok(())
    }
}
