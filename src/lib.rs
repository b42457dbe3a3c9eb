//! Pokedex - an interactive PokeAPI explorer
//!
//! Built around `TimedCache`, an in-memory byte cache whose entries are swept
//! out by a background reaper once per interval.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::TimedCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use tasks::spawn_reaper_task;
