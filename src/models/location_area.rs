//! Location area resource (`GET /location-area/{id or name}/`)
//!
//! Mirrors the subset of the PokeAPI schema the REPL reads. Unknown fields are
//! ignored by serde.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A location area and the pokemon that can be encountered there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub game_index: u32,
    #[serde(default)]
    pub encounter_method_rates: Vec<EncounterMethodRate>,
    pub location: Option<NamedResource>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of every pokemon encounterable in this area, in API order.
    pub fn pokemon_names(&self) -> Vec<String> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterMethodRate {
    pub encounter_method: NamedResource,
    #[serde(default)]
    pub version_details: Vec<EncounterVersionRate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterVersionRate {
    pub rate: u32,
    pub version: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEncounterDetail {
    pub version: NamedResource,
    pub max_chance: u32,
    #[serde(default)]
    pub encounter_details: Vec<Encounter>,
}

/// One way a pokemon can be met in a given version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub min_level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub condition_values: Vec<NamedResource>,
    pub chance: u32,
    pub method: NamedResource,
}
