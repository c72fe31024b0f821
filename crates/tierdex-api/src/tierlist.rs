//! Handlers for the per-user tier list.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/save_tierlist` | Body: `{"tierlist": <payload>}`; 401 without session, 400 if empty |
//! | `GET`  | `/get_tierlist`  | `{"tierlist": <payload or null>}`; never 401 |

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tierdex_core::{
  store::TierStore,
  tierlist::{self, TierlistPayload},
};

use crate::{error::ApiError, session::SessionUser};

#[derive(Debug, Deserialize, Default)]
pub struct SaveBody {
  pub tierlist: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct TierlistResponse {
  pub tierlist: Option<TierlistPayload>,
}

/// `POST /save_tierlist` — body: `{"tierlist": "..."}`.
///
/// A body that is not a JSON object is treated as carrying no tier list.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  SessionUser(user): SessionUser,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: TierStore,
{
  let body: SaveBody = serde_json::from_slice(&body).unwrap_or_default();
  let user = tierlist::save(store.as_ref(), user, body.tierlist.as_ref()).await?;

  tracing::info!(%user, "saved tier list");
  Ok(Json(json!({ "success": true })))
}

/// `GET /get_tierlist`
pub async fn get<S>(
  State(store): State<Arc<S>>,
  SessionUser(user): SessionUser,
) -> Result<Json<TierlistResponse>, ApiError>
where
  S: TierStore,
{
  let tierlist = tierlist::get(store.as_ref(), user).await?;
  Ok(Json(TierlistResponse { tierlist }))
}
