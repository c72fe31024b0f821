//! HTTP server for Tierdex.
//!
//! Combines the JSON API from `tierdex-api` with signed-cookie sessions,
//! account routes, the HTML shells and the static client assets into one
//! axum [`Router`] backed by any [`TierStore`].

pub mod accounts;
pub mod error;
pub mod pages;
pub mod session;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router, middleware,
  routing::{get, post},
};
use serde::Deserialize;
use tierdex_core::store::TierStore;
use tower_http::{services::ServeDir, trace::TraceLayer};

use session::SessionKey;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TIERDEX_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Key for signing session cookies. Required to serve; there is no default.
  pub session_secret:   Option<String>,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_secs: u32,
  #[serde(default = "default_static_dir")]
  pub static_dir:       PathBuf,
}

impl ServerConfig {
  /// Layer `env` over the optional TOML file at `path`.
  ///
  /// Environment values stay strings until deserialised into their field
  /// type, so an all-digit `session_secret` is kept verbatim.
  pub fn load(path: PathBuf, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_session_ttl() -> u32 { 7 * 24 * 60 * 60 }

fn default_static_dir() -> PathBuf { PathBuf::from("static") }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the account handlers.
#[derive(Clone)]
pub struct AppState<S: TierStore> {
  pub store:   Arc<S>,
  pub session: Arc<SessionKey>,
  pub config:  Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: TierStore + Clone + 'static,
{
  let accounts = Router::new()
    .route("/register", post(accounts::register::<S>))
    .route("/login", post(accounts::login::<S>))
    .route("/logout", get(accounts::logout))
    .with_state(state.clone());

  Router::new()
    .route("/", get(pages::index))
    .route("/gen/{generation}", get(pages::generation))
    .nest_service("/static", ServeDir::new(&state.config.static_dir))
    .merge(accounts)
    .merge(tierdex_api::api_router(state.store.clone()))
    .layer(middleware::from_fn_with_state(state.session.clone(), session::resolve))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
