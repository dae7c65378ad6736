//! Time-bounded memoization of lookups.
//!
//! Entries expire a fixed time after insertion. Misses are not coalesced: two
//! callers racing on the same missing key both compute, and the later insert
//! wins.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Cached value with its insertion time.
#[derive(Debug, Clone)]
struct CachedValue<V> {
    value: V,
    cached_at: Instant,
}

impl<V> CachedValue<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() >= ttl
    }
}

/// A thread-safe TTL cache keyed by string.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<String, CachedValue<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache whose entries live for `ttl`, holding at most
    /// `max_entries` values.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|cached| !cached.is_expired(self.ttl))
            .map(|cached| cached.value.clone())
    }

    /// Store `value` under `key`, evicting if the cache is full.
    pub fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.write();
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, cached| !cached.is_expired(ttl));
            if entries.len() >= self.max_entries
                && let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, cached)| cached.cached_at)
                    .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
            }
        }
        entries.insert(key, CachedValue::new(value));
    }

    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// `compute` runs without holding the lock.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(key) {
            tracing::trace!(key, "cache hit");
            return hit;
        }
        tracing::trace!(key, "cache miss");
        let value = compute();
        self.insert(key.to_string(), value.clone());
        value
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
