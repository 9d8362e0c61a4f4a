//! Persistent key-value storage backends
//!
//! The response cache writes through a small synchronous [`Storage`] trait
//! shaped like browser `localStorage`: string keys, string values, and key
//! enumeration for prefix-based clearing.
//!
//! - [`FileStorage`]: one file per key under a directory, survives restarts
//! - [`MemoryStorage`]: process-local map with an optional byte quota

use crate::error::{Error, ErrorCode, Result, ResultExt};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Synchronous string key-value store
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Enumerate every stored key
    fn keys(&self) -> Result<Vec<String>>;
}

/// File extension for stored values
const ITEM_EXTENSION: &str = "item";

/// On-disk record: the original key travels with its value
#[derive(Serialize, Deserialize)]
struct StoredItem {
    key: String,
    value: String,
}

/// Directory-backed storage
///
/// Files are named by the SHA-256 of their key, so key length and content
/// never reach the file system. The key itself is stored in the file for
/// [`Storage::keys`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) storage rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::storage_unavailable(format!(
                "Failed to create storage directory {}: {}",
                dir.display(),
                e
            ))
            .with_source(e)
        })?;

        Ok(Self { dir })
    }

    /// Open storage at the default per-user cache location
    pub fn open_default() -> Result<Self> {
        Self::open(default_dir())
    }

    /// Root directory of this storage
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", hash_key(key), ITEM_EXTENSION))
    }

    fn read_item(path: &Path) -> Result<Option<StoredItem>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Default storage directory (`$XDG_CACHE_HOME/xeluxe` or `./.cache/xeluxe`)
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("xeluxe")
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let item = Self::read_item(&self.item_path(key))
            .context(format!("Reading storage key {key}"))?;

        // A digest collision reads as a miss
        Ok(item.filter(|item| item.key == key).map(|item| item.value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let content = serde_json::to_string(&StoredItem {
            key: key.to_string(),
            value: value.to_string(),
        })?;

        fs::write(self.item_path(key), content).map_err(|e| {
            Error::new(ErrorCode::StorageWriteFailed, format!("Failed to write {key}"))
                .with_source(e)
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e).with_context(format!("Removing storage key {key}"))),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != ITEM_EXTENSION) {
                continue;
            }

            // Files we did not write are skipped rather than reported
            if let Ok(Some(item)) = Self::read_item(&path) {
                keys.push(item.key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys plus values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: RwLock::default(),
            quota_bytes: Some(bytes),
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned() -> Error {
    Error::new(ErrorCode::Internal, "Storage lock poisoned")
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(|_| lock_poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|_| lock_poisoned())?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(Error::new(
                    ErrorCode::StorageWriteFailed,
                    format!("Storage quota of {quota} bytes exceeded"),
                ));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|_| lock_poisoned())?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let items = self.items.read().map_err(|_| lock_poisoned())?;
        Ok(items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_roundtrip() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();

        storage.set_item("api_cache_settings", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get_item("api_cache_settings").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(storage.get_item("missing").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_keys_survive_odd_characters() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();

        storage.set_item("blog/list?page=2&type=news", "x").unwrap();
        storage.set_item("plain", "y").unwrap();
        fs::write(temp.path().join("stray.txt"), "ignored").unwrap();

        let keys = storage.keys().unwrap();
        assert_eq!(keys, vec!["blog/list?page=2&type=news", "plain"]);
    }

    #[test]
    fn test_file_storage_long_keys() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();
        let key = format!("api_cache_/public-api/blogs.php?type=case-study&q={}", "x".repeat(200));

        storage.set_item(&key, "42").unwrap();
        assert_eq!(storage.get_item(&key).unwrap().as_deref(), Some("42"));
        assert_eq!(storage.keys().unwrap(), vec![key.clone()]);

        storage.remove_item(&key).unwrap();
        assert!(storage.get_item(&key).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_skips_foreign_item_files() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();

        storage.set_item("kept", "v").unwrap();
        fs::write(temp.path().join("deadbeef.item"), "not json").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        FileStorage::open(temp.path())
            .unwrap()
            .set_item("k", "v")
            .unwrap();

        let reopened = FileStorage::open(temp.path()).unwrap();
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();
        assert!(storage.remove_item("never-written").is_ok());

        let memory = MemoryStorage::new();
        assert!(memory.remove_item("never-written").is_ok());
    }

    #[test]
    fn test_memory_quota() {
        let storage = MemoryStorage::with_quota(16);

        storage.set_item("key", "small").unwrap();
        let err = storage.set_item("other", "much too large value").unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageWriteFailed);

        // Overwriting an existing key only counts the new value
        storage.set_item("key", "0123456789ab").unwrap();
        assert_eq!(storage.len(), 1);
    }
}
