//! Persisted response cache keyed by caller-supplied strings.
//!
//! Records are overwritten wholesale on each successful dispatch that names a
//! `cache_key`; reads never mutate. Nothing here expires entries — freshness
//! is entirely the caller's responsibility (e.g. by choosing cache-first
//! versus network-first per call).

use crate::types::Body;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Canonical file extension for persisted cache records.
const CACHE_FILE_EXT: &str = "json";
/// On-disk schema version for [`PersistedRecord`].
const CACHE_FILE_VERSION: u32 = 1;

/// A cached payload plus its save timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub payload: Body,
    /// Save time in Unix epoch milliseconds.
    pub saved_at_millis: u64,
}

/// Key-value store for response payloads.
///
/// Atomic at key granularity, last-write-wins: two concurrent writers to the
/// same key race and the later write survives. `set` is best-effort — storage
/// failures are logged and never surfaced into the request path.
pub trait ResponseCache: Send + Sync {
    /// Look up the record for a key, if one exists.
    fn get(&self, key: &str) -> Option<CacheRecord>;
    /// Write or overwrite the record for a key.
    fn set(&self, key: &str, payload: Body);
}

// ---------------------------------------------------------------------------
// MemoryCache
// ---------------------------------------------------------------------------

/// In-memory cache for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: Mutex<HashMap<String, CacheRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheRecord> {
        self.records.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, payload: Body) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(
                key.to_string(),
                CacheRecord {
                    payload,
                    saved_at_millis: now_unix_millis(),
                },
            );
        }
    }
}

// ---------------------------------------------------------------------------
// FileCache
// ---------------------------------------------------------------------------

/// On-disk envelope for persisted records.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRecord {
    /// File-format version for forward compatibility checks.
    version: u32,
    /// The caller-supplied key, echoed for debuggability.
    key: String,
    saved_at_millis: u64,
    payload: Body,
}

/// Filesystem-backed cache: one JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    records_dir: PathBuf,
}

impl FileCache {
    /// Open/create a cache rooted under the given directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, String> {
        let records_dir = root.as_ref().to_path_buf();
        fs::create_dir_all(&records_dir).map_err(|e| {
            format!(
                "failed to create cache directory {}: {e}",
                records_dir.display()
            )
        })?;
        Ok(Self { records_dir })
    }

    /// Build the on-disk path for a cache key.
    fn record_path(&self, key: &str) -> PathBuf {
        self.records_dir.join(format!("{key}.{CACHE_FILE_EXT}"))
    }

    fn write_record(&self, key: &str, payload: Body) -> Result<(), String> {
        validate_cache_key(key)?;
        let record = PersistedRecord {
            version: CACHE_FILE_VERSION,
            key: key.to_string(),
            saved_at_millis: now_unix_millis(),
            payload,
        };
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| format!("failed to serialize cache record {key}: {e}"))?;
        let path = self.record_path(key);
        // Write to a sibling temporary file first so partial writes do not
        // corrupt the last known-good record.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            format!(
                "failed to write temporary cache file {}: {e}",
                tmp_path.display()
            )
        })?;
        // Rename is atomic on most filesystems, making this "all or nothing".
        fs::rename(&tmp_path, &path)
            .map_err(|e| format!("failed to move cache file into place {}: {e}", path.display()))
    }
}

impl ResponseCache for FileCache {
    fn get(&self, key: &str) -> Option<CacheRecord> {
        validate_cache_key(key).ok()?;
        let raw = fs::read_to_string(self.record_path(key)).ok()?;
        let record: PersistedRecord = serde_json::from_str(&raw).ok()?;
        if record.version != CACHE_FILE_VERSION {
            return None;
        }
        Some(CacheRecord {
            payload: record.payload,
            saved_at_millis: record.saved_at_millis,
        })
    }

    fn set(&self, key: &str, payload: Body) {
        if let Err(reason) = self.write_record(key, payload) {
            tracing::warn!(key, %reason, "cache write failed");
        }
    }
}

/// Validate caller-supplied cache keys before touching the filesystem.
fn validate_cache_key(key: &str) -> Result<(), String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err("cache key cannot be empty".to_string());
    }
    if trimmed == "." || trimmed == ".." {
        return Err("cache key cannot be '.' or '..'".to_string());
    }
    if trimmed
        .chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.'))
    {
        return Err("cache key can only contain ASCII letters, numbers, '.', '-', '_'".to_string());
    }
    Ok(())
}

/// Current Unix timestamp in milliseconds.
pub(crate) fn now_unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use serde_json::json;

    // Ensures cached payloads round-trip through disk serialization.
    #[test]
    fn file_cache_round_trips_payloads() {
        let dir = TestTempDir::new("cache");
        let cache = FileCache::open(dir.path()).expect("cache should open");
        let payload = Body::Json(json!({"id": 9, "name": "Science"}));
        cache.set("categories", payload.clone());
        let record = cache.get("categories").expect("record should exist");
        assert_eq!(record.payload, payload);
        assert!(record.saved_at_millis > 0);
    }

    // Ensures writes replace records wholesale rather than merging.
    #[test]
    fn file_cache_overwrites_on_set() {
        let dir = TestTempDir::new("cache");
        let cache = FileCache::open(dir.path()).expect("cache should open");
        cache.set("k", Body::Text("first".to_string()));
        cache.set("k", Body::Text("second".to_string()));
        let record = cache.get("k").expect("record should exist");
        assert_eq!(record.payload, Body::Text("second".to_string()));
    }

    // Ensures invalid keys are rejected before any filesystem access.
    #[test]
    fn file_cache_rejects_invalid_keys() {
        let dir = TestTempDir::new("cache");
        let cache = FileCache::open(dir.path()).expect("cache should open");
        cache.set("../escape", Body::Text("nope".to_string()));
        assert!(cache.get("../escape").is_none());
        assert!(cache.get("").is_none());
    }

    // Ensures records with an unknown schema version are treated as absent.
    #[test]
    fn file_cache_ignores_future_versions() {
        let dir = TestTempDir::new("cache");
        let cache = FileCache::open(dir.path()).expect("cache should open");
        let raw = serde_json::to_string(&PersistedRecord {
            version: CACHE_FILE_VERSION + 1,
            key: "k".to_string(),
            saved_at_millis: 1,
            payload: Body::Text("future".to_string()),
        })
        .expect("serialize");
        std::fs::write(dir.path().join("k.json"), raw).expect("write fixture");
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn memory_cache_get_set_overwrite() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());
        cache.set("k", Body::Text("a".to_string()));
        cache.set("k", Body::Text("b".to_string()));
        assert_eq!(
            cache.get("k").map(|r| r.payload),
            Some(Body::Text("b".to_string()))
        );
    }
}
