//! Pokémon reference data and the generation-filtered listing.
//!
//! Pokémon and rankings are seeded once and read on every page load. The
//! listing joins each Pokémon against the default ranking list; an unranked
//! Pokémon reports `rank = 0, position = 0`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, store::TierStore};

/// The ranking list joined by [`list`].
pub const DEFAULT_LIST_ID: i64 = 1;

/// Immutable per-Pokémon metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
  pub id:         i64,
  pub name:       String,
  /// External image reference, served as-is to the client.
  pub sprite_url: String,
  pub generation: i64,
}

/// Placement of one Pokémon within a ranking list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
  pub pokemon_id: i64,
  pub list_id:    i64,
  /// Ordinal tier.
  pub rank:       i64,
  /// Order within the tier.
  pub position:   i64,
}

/// A Pokémon as returned by `GET /api/pokemon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonView {
  pub id:         i64,
  pub name:       String,
  pub sprite_url: String,
  pub rank:       i64,
  pub position:   i64,
}

/// Which generations a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationFilter {
  #[default]
  All,
  Only(i64),
}

impl GenerationFilter {
  /// Interpret the optional `gen` query parameter. Zero is not a valid
  /// generation and means the same as an absent parameter.
  pub fn from_param(generation: Option<i64>) -> Self {
    match generation {
      None | Some(0) => Self::All,
      Some(g) => Self::Only(g),
    }
  }
}

/// Seed file contents: `{"pokemon": [...], "rankings": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
  #[serde(default)]
  pub pokemon:  Vec<Pokemon>,
  #[serde(default)]
  pub rankings: Vec<Ranking>,
}

/// List Pokémon ordered by id, optionally restricted to one generation.
pub async fn list<S>(store: &S, generation: Option<i64>) -> Result<Vec<PokemonView>>
where
  S: TierStore,
{
  store
    .list_pokemon(GenerationFilter::from_param(generation))
    .await
    .map_err(Error::storage)
}
