//! Response cache with per-entry time-to-live
//!
//! Entries are stored as JSON `{ "data", "timestamp", "ttl" }` under the
//! key `"api_cache_" + key` in any [`Storage`] backend. Expiry is lazy: an
//! entry older than its TTL is removed by the read that finds it.
//!
//! Caching is best-effort. Writes that fail are logged and dropped, and
//! reads that hit a missing, expired or undecodable entry report a miss.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use xeluxe_core::cache::ResponseCache;
//! use xeluxe_core::storage::FileStorage;
//!
//! let cache = ResponseCache::new(FileStorage::open_default()?);
//!
//! cache.put_with_ttl("settings", &vec!["a", "b"], Duration::from_secs(60));
//!
//! if let Some(value) = cache.get::<Vec<String>>("settings") {
//!     println!("Cached: {:?}", value);
//! }
//! # Ok::<(), xeluxe_core::Error>(())
//! ```

use crate::storage::Storage;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Namespace prefix for every cache key in storage
pub const CACHE_PREFIX: &str = "api_cache_";

/// Default time-to-live (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Stored cache entry, as read back
#[derive(Debug, Deserialize)]
struct CacheEntry<T> {
    data: T,
    /// Write time, epoch milliseconds
    timestamp: i64,
    /// Lifetime, milliseconds
    ttl: u64,
}

/// Stored cache entry, as written
#[derive(Serialize)]
struct CacheEntryRef<'a, T> {
    data: &'a T,
    timestamp: i64,
    ttl: u64,
}

/// Envelope without the payload, for expiry scans
#[derive(Deserialize)]
struct EntryHeader {
    timestamp: i64,
    ttl: u64,
}

fn is_expired(timestamp: i64, ttl: u64, now: i64) -> bool {
    let ttl = i64::try_from(ttl).unwrap_or(i64::MAX);
    now.saturating_sub(timestamp) > ttl
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// TTL cache over a shared storage backend
pub struct ResponseCache<S> {
    storage: Arc<S>,
    default_ttl: Duration,
}

impl<S> Clone for ResponseCache<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            default_ttl: self.default_ttl,
        }
    }
}

impl<S: Storage> ResponseCache<S> {
    /// Create a cache over `storage`
    pub fn new(storage: S) -> Self {
        Self::from_shared(Arc::new(storage))
    }

    /// Create a cache over storage that other components also hold
    pub fn from_shared(storage: Arc<S>) -> Self {
        Self {
            storage,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Set the TTL used by [`ResponseCache::put`]
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// The underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Namespaced storage key for a cache key
    pub fn storage_key(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    /// Cache `data` with the default TTL
    pub fn put<T: Serialize>(&self, key: &str, data: &T) {
        self.put_with_ttl(key, data, self.default_ttl);
    }

    /// Cache `data` for `ttl`; failures are logged, never returned
    pub fn put_with_ttl<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) {
        let entry = CacheEntryRef {
            data,
            timestamp: Utc::now().timestamp_millis(),
            ttl: duration_ms(ttl),
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&Self::storage_key(key), &json) {
            warn!(key = %key, error = %e, "Failed to cache response");
        }
    }

    /// Read a live entry; expired entries are evicted
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage_key = Self::storage_key(key);

        let raw = match self.storage.get_item(&storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cached response");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                return None;
            }
        };

        if is_expired(entry.timestamp, entry.ttl, Utc::now().timestamp_millis()) {
            debug!(key = %key, "Cache entry expired");
            if let Err(e) = self.storage.remove_item(&storage_key) {
                warn!(key = %key, error = %e, "Failed to evict expired cache entry");
            }
            return None;
        }

        Some(entry.data)
    }

    /// Remove one entry
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(&Self::storage_key(key)) {
            warn!(key = %key, error = %e, "Failed to remove cached response");
        }
    }

    /// Remove every cache entry, leaving unrelated storage keys alone.
    ///
    /// Returns the number of entries removed.
    pub fn clear_all(&self) -> usize {
        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Failed to enumerate cache keys");
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(CACHE_PREFIX)) {
            match self.storage.remove_item(key) {
                Ok(()) => removed += 1,
                Err(e) => warn!(key = %key, error = %e, "Failed to clear cache entry"),
            }
        }

        debug!(removed, "Cleared API cache");
        removed
    }

    /// Evict every expired entry without waiting for a read
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now().timestamp_millis();
        let mut removed = 0;

        for key in self.prefixed_keys() {
            let expired = self
                .storage
                .get_item(&key)
                .ok()
                .flatten()
                .and_then(|raw| serde_json::from_str::<EntryHeader>(&raw).ok())
                .map_or(false, |header| is_expired(header.timestamp, header.ttl, now));

            if expired && self.storage.remove_item(&key).is_ok() {
                removed += 1;
            }
        }

        removed
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = Utc::now().timestamp_millis();
        let mut stats = CacheStats::default();

        for key in self.prefixed_keys() {
            let Some(raw) = self.storage.get_item(&key).ok().flatten() else {
                continue;
            };

            stats.total_entries += 1;
            stats.total_size_bytes += raw.len() as u64;

            match serde_json::from_str::<EntryHeader>(&raw) {
                Ok(header) if is_expired(header.timestamp, header.ttl, now) => {
                    stats.expired_entries += 1;
                }
                Ok(_) => {}
                Err(_) => stats.corrupt_entries += 1,
            }
        }

        stats
    }

    /// Return the cached value for `key`, or run `operation` and cache its
    /// success for `ttl`. Errors are returned and never cached.
    pub async fn cached<T, E, F, Fut>(&self, key: &str, ttl: Duration, operation: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get::<T>(key) {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        let value = operation().await?;
        self.put_with_ttl(key, &value, ttl);
        Ok(value)
    }

    fn prefixed_keys(&self) -> Vec<String> {
        self.storage
            .keys()
            .unwrap_or_default()
            .into_iter()
            .filter(|k| k.starts_with(CACHE_PREFIX))
            .collect()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Total number of cache entries
    pub total_entries: usize,
    /// Entries past their TTL that no read has evicted yet
    pub expired_entries: usize,
    /// Entries whose envelope cannot be decoded
    pub corrupt_entries: usize,
    /// Total size of stored entries in bytes
    pub total_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    fn memory_cache() -> ResponseCache<MemoryStorage> {
        ResponseCache::new(MemoryStorage::new())
    }

    #[test]
    fn test_put_and_get() {
        let cache = memory_cache();
        let value = json!({"site_name": "Xeluxe", "tags": ["fire", "safety"]});

        cache.put_with_ttl("settings", &value, Duration::from_secs(60));
        let cached: Option<serde_json::Value> = cache.get("settings");

        assert_eq!(cached, Some(value));
    }

    #[test]
    fn test_entry_layout() {
        let cache = memory_cache();
        cache.put("clients", &vec![1, 2, 3]);

        let raw = cache.storage().get_item("api_cache_clients").unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(stored["data"], json!([1, 2, 3]));
        assert_eq!(stored["ttl"], json!(300_000));
        assert!(stored["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_get_missing() {
        let cache = memory_cache();
        assert!(cache.get::<String>("nonexistent").is_none());
    }

    #[test]
    fn test_expiry_evicts_entry() {
        let cache = memory_cache();

        cache.put_with_ttl("short", &"value", Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(50));

        assert!(cache.get::<String>("short").is_none());
        assert!(cache
            .storage()
            .get_item("api_cache_short")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_undecodable_entry_is_a_miss() {
        let cache = memory_cache();
        cache.storage().set_item("api_cache_broken", "not json").unwrap();
        cache.put("typed", &"a string");

        assert!(cache.get::<String>("broken").is_none());
        assert!(cache.get::<u32>("typed").is_none());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let cache = ResponseCache::new(MemoryStorage::with_quota(8));
        cache.put("too_big", &"x".repeat(64));
        assert!(cache.get::<String>("too_big").is_none());
    }

    #[test]
    fn test_clear_all_keeps_foreign_keys() {
        let cache = memory_cache();
        cache.put("a", &1);
        cache.put("b", &2);
        cache.storage().set_item("user_prefs", "dark").unwrap();

        assert_eq!(cache.clear_all(), 2);
        assert!(cache.get::<i32>("a").is_none());
        assert_eq!(
            cache.storage().get_item("user_prefs").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_stats_and_purge() {
        let cache = memory_cache();
        cache.put("fresh", &"x");
        cache.put_with_ttl("stale", &"y", Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 1);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.stats().total_entries, 1);
    }

    #[test]
    fn test_file_backed_cache_survives_reopen() {
        let temp = TempDir::new().unwrap();
        ResponseCache::new(FileStorage::open(temp.path()).unwrap()).put("k", &42u32);

        let reopened = ResponseCache::new(FileStorage::open(temp.path()).unwrap());
        assert_eq!(reopened.get::<u32>("k"), Some(42));
    }

    #[test]
    fn test_file_backed_cache_long_filter_key() {
        let temp = TempDir::new().unwrap();
        let cache = ResponseCache::new(FileStorage::open(temp.path()).unwrap());
        let key = format!(
            "/public-api/blogs.php?type=case-study&sort=newest&q={}",
            "x".repeat(80)
        );

        cache.put_with_ttl(&key, &42u32, Duration::from_secs(60));
        assert_eq!(cache.get::<u32>(&key), Some(42));
        assert_eq!(cache.stats().total_entries, 1);
        assert_eq!(cache.clear_all(), 1);
    }

    #[tokio::test]
    async fn test_cached_runs_operation_once() {
        let cache = memory_cache();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value: Result<String, String> = cache
                .cached("services", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("fresh".to_string())
                })
                .await;
            assert_eq!(value.unwrap(), "fresh");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_does_not_store_errors() {
        let cache = memory_cache();

        let first: Result<String, &str> = cache
            .cached("flaky", Duration::from_secs(60), || async { Err("down") })
            .await;
        assert!(first.is_err());
        assert!(cache.storage().is_empty());
    }

    #[test]
    fn test_expiry_boundary() {
        assert!(!is_expired(1_000, 10, 1_010));
        assert!(is_expired(1_000, 10, 1_011));
        assert!(!is_expired(1_000, u64::MAX, i64::MAX));
    }
}
