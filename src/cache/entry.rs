//! Cache Entry Module
//!
//! Defines a single cached payload stamped with its insertion time.

use tokio::time::Instant;

// == Cache Entry ==
/// A stored byte payload plus the instant it was inserted.
///
/// Entries are never mutated after insertion; the store either keeps one
/// untouched or the reaper deletes it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    value: Vec<u8>,
    /// Instant the entry was inserted
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::stamped(value, Instant::now())
    }

    /// Creates an entry with an explicit insertion instant.
    pub fn stamped(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// Returns the stored payload.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the instant the entry was inserted.
    pub fn inserted_at(&self) -> Instant {
        self.created_at
    }

    // == Is Stale ==
    /// Checks whether a sweep firing at `tick` removes this entry.
    ///
    /// Boundary condition: only entries created strictly before the tick are
    /// stale. An entry stamped exactly at the tick survives until the next one.
    pub fn is_stale_at(&self, tick: Instant) -> bool {
        self.created_at < tick
    }
}
