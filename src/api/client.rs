//! PokeAPI client
//!
//! Fetches location areas and pokemon over HTTP, using a `TimedCache` as a
//! side lookup: check the cache, fetch on a miss, then populate the cache for
//! next time.

use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::TimedCache;
use crate::error::{PokedexError, Result};
use crate::models::{CaughtPokemon, LocationArea, PokemonData};

/// Cache key for one page of location-area names.
pub fn page_key(offset: u32, limit: u32) -> String {
    format!("page{}-{}", offset, offset.saturating_add(limit))
}

/// Cache key for the pokemon list of an area.
pub fn area_key(area: &str) -> String {
    format!("pokemonsInArea_{}", area)
}

/// Client for the PokeAPI with response caching.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: TimedCache,
}

impl PokeApiClient {
    /// Creates a client rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, cache: TimedCache) -> Self {
        Self::with_client(Client::new(), base_url, cache)
    }

    /// Creates a client with a custom HTTP client.
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: TimedCache) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Returns the cache backing this client.
    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}/", self.base_url, path);
        debug!(url = %url, "Fetching");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(PokedexError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    // == Raw Resources ==
    /// Fetches one location area by numeric id or name. Not cached.
    pub async fn location_area(&self, id_or_name: &str) -> Result<LocationArea> {
        self.fetch_json(&format!("location-area/{}", id_or_name)).await
    }

    /// Fetches one pokemon by name or id. Not cached.
    pub async fn pokemon(&self, name: &str) -> Result<PokemonData> {
        self.fetch_json(&format!("pokemon/{}", name)).await
    }

    // == Location Area Names ==
    /// Names of location areas with ids `offset .. offset + limit`.
    ///
    /// Ids the API does not know are skipped. Areas are fetched concurrently;
    /// any other failure fails the whole page and nothing is cached.
    pub async fn location_area_names(&self, offset: u32, limit: u32) -> Result<Vec<String>> {
        let key = page_key(offset, limit);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(split_lines(&cached));
        }
        debug!(key = %key, "Cache miss");

        let fetches = (offset..offset.saturating_add(limit)).map(|id| async move {
            match self.location_area(&id.to_string()).await {
                Ok(area) => Ok(Some(area.name)),
                Err(err) if err.is_not_found() => {
                    debug!(id = id, "Location area not found, skipping");
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        });
        let names: Vec<String> = try_join_all(fetches).await?.into_iter().flatten().collect();

        self.cache.add(key, join_lines(&names)).await;
        Ok(names)
    }

    // == Pokemon In Area ==
    /// Names of the pokemon encounterable in `area`.
    pub async fn pokemon_in_area(&self, area: &str) -> Result<Vec<String>> {
        let key = area_key(area);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(split_lines(&cached));
        }
        debug!(key = %key, "Cache miss");

        let names = self.location_area(area).await?.pokemon_names();

        self.cache.add(key, join_lines(&names)).await;
        Ok(names)
    }

    // == Pokemon To Catch ==
    /// Summary of the named pokemon, cached as JSON under its name.
    ///
    /// A cached payload that no longer decodes is treated as a miss.
    pub async fn pokemon_to_catch(&self, name: &str) -> Result<CaughtPokemon> {
        if let Some(cached) = self.cache.get(name).await {
            match serde_json::from_slice::<CaughtPokemon>(&cached) {
                Ok(pokemon) => {
                    debug!(key = %name, "Cache hit");
                    return Ok(pokemon);
                }
                Err(err) => warn!(key = %name, "Discarding undecodable cache entry: {}", err),
            }
        }
        debug!(key = %name, "Cache miss");

        let pokemon = CaughtPokemon::from(self.pokemon(name).await?);

        self.cache.add(name, serde_json::to_vec(&pokemon)?).await;
        Ok(pokemon)
    }
}

fn join_lines(names: &[String]) -> Vec<u8> {
    names
        .iter()
        .flat_map(|name| name.bytes().chain(std::iter::once(b'\n')))
        .collect()
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
