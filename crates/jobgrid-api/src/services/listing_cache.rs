//! Two-tier TTL cache for listing pages.
//!
//! Tier one is a process-local map shared by every request in the process;
//! it is always available and cleared on restart. Tier two is a directory
//! of JSON files, present only when a cache directory is configured and
//! writable; non-interactive contexts degrade to the memory tier alone.
//! The tiers are independent copies with independent expiry: a write
//! populates whichever tiers exist, and nothing synchronizes or
//! invalidates across them.
//!
//! Expiry is checked at read time against an injected clock. A `get` on an
//! expired entry reports absent and opportunistically evicts the entry;
//! there is no background eviction. Concurrent writes to one key are
//! last-write-wins; entries are derived data, so a lost write only costs
//! a refetch.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `JOBGRID_CACHE_DIR`: directory for the persisted tier (unset: memory
//!   tier only)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use jobgrid_core::{defaults, FilterSet};

/// Time source for expiry checks, injectable for tests.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// One stored entry: the serialized payload plus its expiry envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    payload: serde_json::Value,
    written_at_ms: u64,
    ttl_ms: u64,
}

impl StoredEntry {
    fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.written_at_ms) < self.ttl_ms
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Two-tier listing cache.
#[derive(Clone)]
pub struct ListingCache {
    inner: Arc<ListingCacheInner>,
}

struct ListingCacheInner {
    memory: RwLock<HashMap<String, StoredEntry>>,
    disk_dir: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    prefix: String,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ListingCache {
    /// Create a cache with an optional disk tier and the system clock.
    pub fn new(disk_dir: Option<PathBuf>) -> Self {
        Self::with_clock(disk_dir, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock (tests).
    pub fn with_clock(disk_dir: Option<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(ListingCacheInner {
                memory: RwLock::new(HashMap::new()),
                disk_dir,
                clock,
                prefix: defaults::CACHE_KEY_PREFIX.to_string(),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Memory tier only (non-interactive contexts, tests).
    pub fn memory_only() -> Self {
        Self::new(None)
    }

    /// Create a cache from environment configuration.
    ///
    /// Reads `JOBGRID_CACHE_DIR`. When the directory cannot be created the
    /// disk tier is disabled rather than failing startup.
    pub fn from_env() -> Self {
        let disk_dir = match std::env::var("JOBGRID_CACHE_DIR") {
            Ok(dir) if !dir.is_empty() => {
                let path = PathBuf::from(dir);
                match std::fs::create_dir_all(&path) {
                    Ok(()) => {
                        info!(cache_dir = %path.display(), "Disk cache tier enabled");
                        Some(path)
                    }
                    Err(e) => {
                        warn!(
                            cache_dir = %path.display(),
                            error = %e,
                            "Cache directory unavailable, disk tier disabled"
                        );
                        None
                    }
                }
            }
            _ => {
                info!("JOBGRID_CACHE_DIR not set, disk cache tier disabled");
                None
            }
        };
        Self::new(disk_dir)
    }

    /// Whether the disk tier is active in this context.
    pub fn has_disk_tier(&self) -> bool {
        self.inner.disk_dir.is_some()
    }

    /// Derive the cache key for one `(provider, filters, page)` request.
    ///
    /// The filter set's canonical serialization is sorted and
    /// empty-stripped, so semantically identical requests always collide
    /// on the same key regardless of filter insertion order.
    pub fn cache_key(&self, provider: &str, filters: &FilterSet, page: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(provider.as_bytes());
        hasher.update([0x1f]);
        hasher.update(filters.canonical().as_bytes());
        hasher.update([0x1f]);
        hasher.update(page.to_be_bytes());

        let hash = hex::encode(hasher.finalize());
        format!(
            "{}{}",
            self.inner.prefix,
            &hash[..defaults::CACHE_KEY_DIGEST_LEN]
        )
    }

    /// Get a cached payload, consulting the memory tier then the disk tier.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = self.inner.clock.now_millis();

        {
            let mut memory = self.inner.memory.write().await;
            if let Some(entry) = memory.get(key) {
                if entry.is_fresh(now) {
                    debug!(cache_key = key, cache_tier = "memory", cache_outcome = "hit");
                    self.inner.hits.fetch_add(1, Ordering::Relaxed);
                    return Self::decode(entry);
                }
                debug!(cache_key = key, cache_tier = "memory", cache_outcome = "expired");
                memory.remove(key);
            }
        }

        if let Some(path) = self.disk_path(key) {
            match std::fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<StoredEntry>(&raw) {
                    Ok(entry) if entry.is_fresh(now) => {
                        debug!(cache_key = key, cache_tier = "disk", cache_outcome = "hit");
                        self.inner.hits.fetch_add(1, Ordering::Relaxed);
                        return Self::decode(&entry);
                    }
                    Ok(_) => {
                        debug!(cache_key = key, cache_tier = "disk", cache_outcome = "expired");
                        let _ = std::fs::remove_file(&path);
                    }
                    Err(e) => {
                        warn!(cache_key = key, error = %e, "Corrupt disk cache entry, removing");
                        let _ = std::fs::remove_file(&path);
                    }
                },
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(cache_key = key, error = %e, "Disk cache read failed");
                }
            }
        }

        debug!(cache_key = key, cache_outcome = "miss");
        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a payload in every tier available in this context.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let payload = match serde_json::to_value(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(cache_key = key, error = %e, "Cache serialization failed");
                return false;
            }
        };

        let entry = StoredEntry {
            payload,
            written_at_ms: self.inner.clock.now_millis(),
            ttl_ms: ttl.as_millis() as u64,
        };

        {
            let mut memory = self.inner.memory.write().await;
            memory.insert(key.to_string(), entry.clone());
        }

        if let Some(path) = self.disk_path(key) {
            match serde_json::to_string(&entry) {
                Ok(raw) => {
                    if let Err(e) = std::fs::write(&path, raw) {
                        warn!(cache_key = key, error = %e, "Disk cache write failed");
                    }
                }
                Err(e) => warn!(cache_key = key, error = %e, "Disk cache encode failed"),
            }
        }

        debug!(cache_key = key, ttl_ms = ttl.as_millis() as u64, "Cache SET");
        true
    }

    /// Hit/miss counters since construction.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
        }
    }

    fn decode<T: DeserializeOwned>(entry: &StoredEntry) -> Option<T> {
        match serde_json::from_value(entry.payload.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Cache payload deserialization failed");
                None
            }
        }
    }

    fn disk_path(&self, key: &str) -> Option<PathBuf> {
        self.inner
            .disk_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", key.replace(':', "_"))))
    }
}
