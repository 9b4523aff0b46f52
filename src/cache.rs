//! Time-bounded memoization
//!
//! Entries remember when they were fetched; a read checks the age and drops
//! stale entries. There is no background eviction.

use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Map from key to value that expires `ttl` after insertion
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fresh value for `key`, if any. A stale entry is removed.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let fresh = {
            let entry = self.entries.get(key)?;
            if now.saturating_duration_since(entry.fetched_at) < self.ttl {
                return Some(entry.value.clone());
            }
            entry.fetched_at
        };
        // Only drop the entry we saw; a concurrent refresh may have replaced it
        self.entries.remove_if(key, |_, entry| entry.fetched_at == fresh);
        None
    }

    pub fn insert(&self, key: &str, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn insert_at(&self, key: &str, value: V, fetched_at: Instant) {
        self.entries
            .insert(key.to_string(), CacheEntry { value, fetched_at });
    }
}

#[cfg(test)]
impl<V: Clone> TtlCache<V> {
    /// Insert an entry that was fetched `age` ago
    pub(crate) fn insert_aged(&self, key: &str, value: V, age: Duration) {
        self.insert_at(key, value, Instant::now() - age);
    }

    /// Age of the entry for `key`, fresh or not
    pub(crate) fn age(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|e| e.fetched_at.elapsed())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
