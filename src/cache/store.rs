//! Entry Store Module
//!
//! The unsynchronised map behind a `TimedCache`: insert-if-absent, lookup and
//! tick-aligned sweeps. Callers serialise access through one lock.

use std::collections::HashMap;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Entry Store ==
/// Key to entry map plus its counters.
#[derive(Debug, Default)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and sweep counters
    stats: CacheStats,
}

impl EntryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Stores `value` under `key` unless the key is already present.
    ///
    /// First write wins: an existing entry keeps its value and its age, so a
    /// re-add never refreshes the entry's lifetime. Returns whether the value
    /// was inserted.
    pub fn add(&mut self, key: String, value: Vec<u8>) -> bool {
        self.add_at(key, value, Instant::now())
    }

    /// Same as [`EntryStore::add`] with an explicit insertion instant.
    pub fn add_at(&mut self, key: String, value: Vec<u8>, now: Instant) -> bool {
        if self.entries.contains_key(&key) {
            self.stats.record_ignored_add();
            return false;
        }

        self.entries.insert(key, CacheEntry::stamped(value, now));
        self.stats.set_total_entries(self.entries.len());
        true
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Staleness is not checked here; an entry stays visible until a sweep
    /// removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().to_vec())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry created strictly before `tick`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, tick: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale_at(tick));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
