//! JSON API for Tierdex.
//!
//! Exposes an axum [`Router`] backed by any [`tierdex_core::store::TierStore`].
//! Session handling, TLS, and transport concerns are the caller's
//! responsibility: whoever mounts this router must place the signed-in
//! [`UserId`](tierdex_core::user::UserId) into the request extensions (see
//! [`SessionUser`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(tierdex_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod pokemon;
pub mod session;
pub mod tierlist;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tierdex_core::store::TierStore;

pub use error::ApiError;
pub use session::SessionUser;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TierStore + 'static,
{
  Router::new()
    .route("/api/pokemon", get(pokemon::list::<S>))
    .route("/save_tierlist", post(tierlist::save::<S>))
    .route("/get_tierlist", get(tierlist::get::<S>))
    .with_state(store)
}
