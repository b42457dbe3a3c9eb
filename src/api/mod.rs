//! API Module
//!
//! HTTP fetch glue for the PokeAPI.
//!
//! # Resources
//! - `GET /location-area/{id or name}/` - a location area and its encounters
//! - `GET /pokemon/{name}/` - pokemon details

pub mod client;

pub use client::PokeApiClient;
