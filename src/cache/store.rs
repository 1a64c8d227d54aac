//! Cache Store Module
//!
//! The key to entry mapping behind the cache. The store itself is not
//! synchronized; `Cache` wraps it in a lock and every method here runs while
//! that lock is held, so none of them perform I/O.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheStats};

// == Entry Info ==
/// Snapshot of one entry's metadata, for display.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub key: String,
    pub age: Duration,
    pub cached_at: DateTime<Utc>,
    pub size: usize,
}

// == Cache Store ==
/// Key to entry storage with hit/miss bookkeeping.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Stores a payload under `key`, replacing any previous entry.
    ///
    /// The replacement gets a fresh timestamp, so re-adding a key restarts
    /// its age.
    pub fn put(&mut self, key: String, payload: Bytes) {
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    ///
    /// Age is not checked here; expiry is the reaper's job.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.payload())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Like `get`, without touching the hit/miss counters.
    pub fn peek(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(CacheEntry::payload)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Scan Older Than ==
    /// Returns every key whose entry was inserted before `cutoff`.
    pub fn scan_older_than(&self, cutoff: Instant) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_older_than(cutoff))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Reap ==
    /// Deletes every entry inserted before `cutoff`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, cutoff: Instant) -> usize {
        let expired = self.scan_older_than(cutoff);
        let count = expired.iter().filter(|key| self.delete(key)).count();
        self.stats.record_reaped(count);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Entries ==
    /// Lists entry metadata, oldest first.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let mut infos: Vec<EntryInfo> = self
            .entries
            .iter()
            .map(|(key, entry)| EntryInfo {
                key: key.clone(),
                age: entry.age(),
                cached_at: entry.cached_at(),
                size: entry.payload().len(),
            })
            .collect();
        infos.sort_by(|a, b| b.age.cmp(&a.age));
        infos
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn payload(s: &'static str) -> Bytes {
        Bytes::from_static(s.as_bytes())
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("value1"));

        assert_eq!(store.get("key1"), Some(payload("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("value1"));
        store.put("key1".to_string(), payload("value2"));

        assert_eq!(store.get("key1"), Some(payload("value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("value1"));
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_noop() {
        let mut store = CacheStore::new();
        store.put("key1".to_string(), payload("value1"));

        assert!(!store.delete("nonexistent"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_scan_older_than() {
        let mut store = CacheStore::new();

        store.put("old".to_string(), payload("a"));
        sleep(Duration::from_millis(30));
        let cutoff = Instant::now();
        store.put("new".to_string(), payload("b"));

        assert_eq!(store.scan_older_than(cutoff), vec!["old".to_string()]);
    }

    #[test]
    fn test_scan_does_not_remove() {
        let mut store = CacheStore::new();
        store.put("old".to_string(), payload("a"));
        sleep(Duration::from_millis(10));

        let keys = store.scan_older_than(Instant::now());
        assert_eq!(keys.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reap_removes_only_older_entries() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("a"));
        store.put("key2".to_string(), payload("b"));
        sleep(Duration::from_millis(30));
        let cutoff = Instant::now();
        store.put("key3".to_string(), payload("c"));

        let removed = store.reap(cutoff);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key3"), Some(payload("c")));
        assert_eq!(store.stats().reaped, 2);
    }

    #[test]
    fn test_reput_escapes_reap() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("a"));
        sleep(Duration::from_millis(30));
        let cutoff = Instant::now();
        store.put("key1".to_string(), payload("a"));

        assert_eq!(store.reap(cutoff), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.put("key1".to_string(), payload("value1"));
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_entries_oldest_first() {
        let mut store = CacheStore::new();

        store.put("first".to_string(), payload("aaaa"));
        sleep(Duration::from_millis(10));
        store.put("second".to_string(), payload("b"));

        let infos = store.entries();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].key, "first");
        assert_eq!(infos[0].size, 4);
        assert_eq!(infos[1].key, "second");
    }
}
