//! Pokemon resource (`GET /pokemon/{name}/`) and the caught-pokemon summary
//! kept in a player's pokedex.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// Pokemon details as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonData {
    pub id: u32,
    pub name: String,
    /// Null for a handful of forms
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    #[serde(default)]
    pub forms: Vec<NamedResource>,
    pub species: Option<NamedResource>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub is_hidden: bool,
    pub slot: u32,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

// == Caught Pokemon ==
/// Summary of a pokemon as shown by `inspect`; also the cached payload for
/// pokemon lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtPokemon {
    pub name: String,
    pub base_experience: u32,
    pub height: u32,
    pub weight: u32,
    /// Stat name to base value
    pub stats: BTreeMap<String, u32>,
    /// Type names in slot order
    pub types: Vec<String>,
}

impl From<PokemonData> for CaughtPokemon {
    fn from(data: PokemonData) -> Self {
        let stats = data
            .stats
            .into_iter()
            .map(|stat| (stat.stat.name, stat.base_stat))
            .collect();

        let mut types = data.types;
        types.sort_by_key(|t| t.slot);

        Self {
            name: data.name,
            base_experience: data.base_experience.unwrap_or_default(),
            height: data.height,
            weight: data.weight,
            stats,
            types: types.into_iter().map(|t| t.kind.name).collect(),
        }
    }
}
