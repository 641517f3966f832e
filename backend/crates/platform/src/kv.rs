//! Key-Value Persistence Capability
//!
//! A minimal `get`/`set`/`remove` capability standing in for client-local
//! storage. The session pointer and the fallback user records both live
//! behind this trait, so callers stay testable without a real client store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Key-value store errors
#[derive(Debug, Error)]
pub enum KvError {
    /// Underlying file I/O failed
    #[error("Key-value store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content is not valid JSON
    #[error("Key-value store corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Client-local key-value persistence
///
/// Operations are synchronous: every implementation keeps the whole store
/// small enough to read and write in one pass.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove the value stored under `key`; removing a missing key is a no-op
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

/// File-backed store: one JSON object per file
///
/// The whole map is re-read and re-written on every mutation, mirroring how
/// small client-local stores behave. A process-local mutex keeps the
/// read-modify-write cycle atomic within this process.
pub struct FileKvStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, KvError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, map: &HashMap<String, String>) -> Result<(), KvError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(map)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let _guard = self.lock.lock().expect("kv lock poisoned");
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let _guard = self.lock.lock().expect("kv lock poisoned");
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let _guard = self.lock.lock().expect("kv lock poisoned");
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral contexts
#[derive(Default)]
pub struct MemoryKvStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.map.lock().expect("kv lock poisoned").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.map
            .lock()
            .expect("kv lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.map.lock().expect("kv lock poisoned").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));

        store.set("key", "other").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("other".to_string()));

        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemoryKvStore::new();
        store.remove("never_set").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_store.json");

        let store = FileKvStore::new(&path);
        store.set("auth_user_id", "abc-123").unwrap();
        drop(store);

        let reopened = FileKvStore::new(&path);
        assert_eq!(
            reopened.get("auth_user_id").unwrap(),
            Some("abc-123".to_string())
        );

        reopened.remove("auth_user_id").unwrap();
        let reopened_again = FileKvStore::new(&path);
        assert_eq!(reopened_again.get("auth_user_id").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_content_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileKvStore::new(&path);
        assert!(matches!(store.get("key"), Err(KvError::Corrupt(_))));
    }
}
