//! Handler for `GET /api/pokemon`.

use std::{num::IntErrorKind, sync::Arc};

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use tierdex_core::{
  pokemon::{self, PokemonView},
  store::TierStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Generation filter. Kept as text so a non-numeric value falls back to
  /// "all generations" instead of rejecting the request.
  #[serde(rename = "gen")]
  pub generation: Option<String>,
}

/// The `gen` parameter as understood by [`list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenerationParam {
  /// Missing or not an integer.
  Absent,
  Value(i64),
  /// An integer outside `i64`; no stored generation can match it.
  OutOfRange,
}

impl ListParams {
  fn generation(&self) -> GenerationParam {
    let Some(raw) = self.generation.as_deref() else {
      return GenerationParam::Absent;
    };
    match raw.trim().parse::<i64>() {
      Ok(g) => GenerationParam::Value(g),
      Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
        GenerationParam::OutOfRange
      }
      Err(_) => GenerationParam::Absent,
    }
  }
}

/// `GET /api/pokemon[?gen=<n>]` — omitted or `0` returns every generation.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PokemonView>>, ApiError>
where
  S: TierStore,
{
  let generation = match params.generation() {
    GenerationParam::Absent => None,
    GenerationParam::Value(g) => Some(g),
    GenerationParam::OutOfRange => return Ok(Json(Vec::new())),
  };
  let views = pokemon::list(store.as_ref(), generation).await?;
  Ok(Json(views))
}
