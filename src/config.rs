//! Configuration Module
//!
//! Handles loading the pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::MIN_INTERVAL;

/// Default PokeAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache reap interval in milliseconds
    pub cache_interval_ms: u64,
    /// PokeAPI root URL, without trailing slash
    pub base_url: String,
    /// Number of location areas shown per `map`/`mapb` page
    pub page_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_MS` - Cache reap interval in milliseconds (default: 6000)
    /// - `POKEAPI_BASE_URL` - API root URL (default: https://pokeapi.co/api/v2)
    /// - `PAGE_SIZE` - Location areas per page (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_interval_ms: env::var("CACHE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_interval_ms),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.page_size),
        }
    }

    /// Returns the reap interval, never shorter than the cache minimum.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_millis(self.cache_interval_ms).max(MIN_INTERVAL)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval_ms: 6000,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
        }
    }
}
