//! TTL-expiring key/value cache
//!
//! One instance per tier, each with a fixed TTL. An entry older than the TTL
//! is treated as absent, not stale; the only exception is [`TtlCache::get_stale`],
//! used by the main roster fetch as an explicit degradation path when the
//! remote source fails.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

/// One cached value with its write timestamp
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    written_at: Instant,
}

/// Snapshot of one cache tier's state, for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub name: String,
    pub ttl_secs: u64,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// A single TTL-expiring cache tier
///
/// Readers during a miss may both recompute and both write; last writer wins.
/// That is acceptable because recomputation is idempotent and the cache never
/// holds the only copy of truth.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache tier with a fixed TTL
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Tier name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a value if present and not expired
    ///
    /// Expired entries are left in place so [`get_stale`](Self::get_stale)
    /// can still observe them; they are overwritten on the next `set`.
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if entry.written_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Get a value regardless of expiry
    ///
    /// Degradation path only: returns whatever was last written, however old.
    pub fn get_stale(&self, key: &str) -> Option<T> {
        let entries = self.entries.read();
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store a value with a fresh write timestamp
    pub fn set(&self, key: impl Into<String>, value: T) {
        let mut entries = self.entries.write();
        entries.insert(
            key.into(),
            Entry {
                value,
                written_at: Instant::now(),
            },
        );
    }

    /// Drop all entries in this tier
    pub fn flush(&self) {
        let mut entries = self.entries.write();
        let dropped = entries.len();
        entries.clear();
        if dropped > 0 {
            tracing::debug!(cache = self.name, dropped, "Cache flushed");
        }
    }

    /// Number of stored entries (expired ones included)
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the tier holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Hit/miss statistics for this tier
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name.to_string(),
            ttl_secs: self.ttl.as_secs(),
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T> std::fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish()
    }
}
