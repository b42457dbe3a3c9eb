//! Timed Cache Module
//!
//! Shared, lock-guarded handle over an `EntryStore` that owns its reaper.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::cache::{CacheStats, EntryStore, MIN_INTERVAL};
use crate::tasks::spawn_reaper_task;

// == Timed Cache ==
/// In-memory byte cache whose entries are swept out on a fixed tick.
///
/// Every entry shares one interval, used both as the reap period and, coarsely,
/// as the time to live. A single mutex covers the whole key space; `add`, `get`
/// and each full sweep take it once.
///
/// Clones share the same entries and the same reaper. The reaper runs until
/// [`TimedCache::shutdown`] is called or the last clone is dropped.
#[derive(Debug, Clone)]
pub struct TimedCache {
    interval: Duration,
    store: Arc<Mutex<EntryStore>>,
    stop: Arc<watch::Sender<bool>>,
    reaper: Arc<JoinHandle<()>>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// The cache is usable immediately; the first sweep happens one full
    /// `interval` from now. A zero interval is raised to [`MIN_INTERVAL`].
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval < MIN_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                "Cache interval below minimum, using {:?}", MIN_INTERVAL
            );
            MIN_INTERVAL
        } else {
            interval
        };

        let store = Arc::new(Mutex::new(EntryStore::new()));
        let (stop, stop_rx) = watch::channel(false);
        let reaper = spawn_reaper_task(Arc::downgrade(&store), interval, stop_rx);

        Self {
            interval,
            store,
            stop: Arc::new(stop),
            reaper: Arc::new(reaper),
        }
    }

    /// Returns the reap interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Add ==
    /// Stores `value` under `key` unless the key is already cached.
    ///
    /// An existing entry is left exactly as it is, value and age included, so
    /// re-adding never extends an entry's life.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let mut store = self.store.lock().await;
        if !store.add(key.into(), value.into()) {
            trace!("Cache add ignored, key already present");
        }
    }

    // == Get ==
    /// Returns a copy of the value cached under `key`, or `None`.
    ///
    /// A miss and the caller's later `add` are separate critical sections;
    /// concurrent callers may both miss, and the first `add` to land sticks.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().await.get(key)
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    // == Shutdown ==
    /// Signals the reaper to stop. Entries stay readable but are no longer
    /// swept. Never called implicitly.
    pub fn shutdown(&self) {
        self.stop.send_replace(true);
    }

    /// Returns true while the reaper task is alive.
    pub fn is_reaping(&self) -> bool {
        !self.reaper.is_finished()
    }
}
