//! PokeAPI response models
//!
//! Serde mirrors of the JSON resources the client fetches, plus the summary
//! stored for caught pokemon.

pub mod location_area;
pub mod pokemon;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use location_area::LocationArea;
pub use pokemon::{CaughtPokemon, PokemonData};

/// A `{name, url}` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}
