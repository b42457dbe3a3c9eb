//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the caches.
//!
//! # Tasks
//! - Reaper: sweeps stale entries out of a `TimedCache` on every tick

mod reaper;

pub use reaper::spawn_reaper_task;
