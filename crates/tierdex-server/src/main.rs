//! tierdex-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `TIERDEX_*` environment variables, opens an in-process SQLite store, and
//! serves the tier-list app over HTTP.
//!
//! # Seeding
//!
//! Pokémon and default rankings are loaded from a JSON file:
//!
//! ```
//! cargo run -p tierdex-server --bin server -- --seed pokemon.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use chrono::TimeDelta;
use clap::Parser;
use tierdex_core::{pokemon::ReferenceData, store::TierStore};
use tierdex_server::{AppState, ServerConfig, session::SessionKey};
use tierdex_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tierdex tier-list server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load Pokémon and rankings from a JSON file into the store and exit.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let server_cfg =
    ServerConfig::load(cli.config, config::Environment::with_prefix("TIERDEX"))
      .context("failed to load configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: load reference data and exit.
  if let Some(seed_path) = cli.seed {
    let raw = tokio::fs::read_to_string(&seed_path)
      .await
      .with_context(|| format!("failed to read seed file {seed_path:?}"))?;
    let data: ReferenceData =
      serde_json::from_str(&raw).context("failed to parse seed file")?;
    store
      .load_reference_data(data)
      .await
      .context("failed to load reference data")?;
    return Ok(());
  }

  let secret = server_cfg
    .session_secret
    .as_deref()
    .context("session_secret is not configured (set TIERDEX_SESSION_SECRET)")?;
  let session = SessionKey::new(
    secret.as_bytes(),
    TimeDelta::seconds(i64::from(server_cfg.session_ttl_secs)),
  )
  .context("invalid session configuration")?;

  // Build application state.
  let state = AppState {
    store:   Arc::new(store),
    session: Arc::new(session),
    config:  Arc::new(server_cfg.clone()),
  };

  let app = tierdex_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
