//! Cache Reaper Task
//!
//! Background task that sweeps stale entries out of a cache on a fixed tick.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::EntryStore;

/// Spawns the reaper for one cache.
///
/// The first tick fires one full `period` after this call, then every
/// `period` after that. Each tick locks the store once and removes every
/// entry created strictly before the tick instant, so an entry lives from
/// just under to just over one period depending on where in the tick window
/// it was inserted.
///
/// The task runs until one of:
/// - `shutdown` receives `true`, or every sender is dropped
/// - the store itself has been dropped (checked on each tick)
///
/// It holds only a weak reference to the store and never keeps it alive.
///
/// # Panics
/// Must be called from within a Tokio runtime, and `period` must be non-zero.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(EntryStore::new()));
/// let (stop_tx, stop_rx) = watch::channel(false);
/// let handle = spawn_reaper_task(Arc::downgrade(&store), Duration::from_secs(5), stop_rx);
/// // Later:
/// stop_tx.send_replace(true);
/// ```
pub fn spawn_reaper_task(
    store: Weak<Mutex<EntryStore>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let first_tick = Instant::now() + period;

    tokio::spawn(async move {
        info!(
            interval_ms = period.as_millis() as u64,
            "Starting cache reaper"
        );

        let mut ticker = time::interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                tick = ticker.tick() => {
                    let Some(store) = store.upgrade() else {
                        debug!("Cache dropped, reaper exiting");
                        break;
                    };

                    let removed = {
                        let mut guard = store.lock().await;
                        guard.reap(tick)
                    };

                    if removed > 0 {
                        info!("Cache reap: removed {} stale entries", removed);
                    } else {
                        debug!("Cache reap: no stale entries found");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}
