//! Cache Module
//!
//! In-memory byte cache with a single shared interval and tick-aligned
//! background eviction.

mod entry;
mod stats;
mod store;
mod timed;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::EntryStore;
pub use timed::TimedCache;

// == Public Constants ==
/// Smallest reap interval a cache accepts
pub const MIN_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);
