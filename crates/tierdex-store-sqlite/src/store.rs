//! [`SqliteStore`] — the SQLite implementation of [`TierStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{ErrorCode, OptionalExtension as _};
use tierdex_core::{
  pokemon::{DEFAULT_LIST_ID, GenerationFilter, PokemonView, ReferenceData},
  store::TierStore,
  tierlist::TierlistPayload,
  user::{NewUser, User, UserId},
};

use crate::{
  Error, Result,
  encode::{RawUser, encode_dt, encode_user_id, pokemon_view_from_row},
  schema::SCHEMA,
};

// Pokémon left-joined against one ranking list; missing rankings read as 0.
const LIST_POKEMON_SQL: &str = "
SELECT p.id, p.name, p.sprite_url,
       COALESCE(r.rank, 0)     AS rank,
       COALESCE(r.position, 0) AS position
FROM pokemon p
LEFT JOIN rankings r
  ON p.id = r.pokemon_id AND r.list_id = ?1";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tierdex store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TierStore impl ──────────────────────────────────────────────────────────

impl TierStore for SqliteStore {
  type Error = Error;

  // ── Pokémon ───────────────────────────────────────────────────────────────

  async fn list_pokemon(&self, filter: GenerationFilter) -> Result<Vec<PokemonView>> {
    let views = self
      .conn
      .call(move |conn| {
        let rows = match filter {
          GenerationFilter::Only(generation) => {
            let mut stmt = conn.prepare(&format!(
              "{LIST_POKEMON_SQL} WHERE p.generation = ?2 ORDER BY p.id"
            ))?;
            stmt
              .query_map(rusqlite::params![DEFAULT_LIST_ID, generation], pokemon_view_from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          GenerationFilter::All => {
            let mut stmt = conn.prepare(&format!("{LIST_POKEMON_SQL} ORDER BY p.id"))?;
            stmt
              .query_map(rusqlite::params![DEFAULT_LIST_ID], pokemon_view_from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
        };
        Ok(rows)
      })
      .await?;

    Ok(views)
  }

  async fn load_reference_data(&self, data: ReferenceData) -> Result<()> {
    let pokemon_count = data.pokemon.len();
    let ranking_count = data.rankings.len();

    self
      .conn
      .call(move |conn| {
        // Dropping an uncommitted transaction rolls it back.
        let tx = conn.transaction()?;
        {
          let mut insert_pokemon = tx.prepare(
            "INSERT INTO pokemon (id, name, sprite_url, generation)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               name       = excluded.name,
               sprite_url = excluded.sprite_url,
               generation = excluded.generation",
          )?;
          for p in &data.pokemon {
            insert_pokemon.execute(rusqlite::params![p.id, p.name, p.sprite_url, p.generation])?;
          }

          let mut insert_ranking = tx.prepare(
            "INSERT INTO rankings (pokemon_id, list_id, rank, position)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(pokemon_id, list_id) DO UPDATE SET
               rank     = excluded.rank,
               position = excluded.position",
          )?;
          for r in &data.rankings {
            insert_ranking.execute(rusqlite::params![r.pokemon_id, r.list_id, r.rank, r.position])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(pokemon = pokemon_count, rankings = ranking_count, "loaded reference data");
    Ok(())
  }

  // ── Tier lists ────────────────────────────────────────────────────────────

  async fn save_tierlist(&self, user: UserId, payload: TierlistPayload) -> Result<()> {
    let user_str = encode_user_id(user);
    let at_str   = encode_dt(Utc::now());
    let data     = payload.into_inner();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tierlists (user_id, data, updated_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT(user_id) DO UPDATE SET
             data       = excluded.data,
             updated_at = excluded.updated_at",
          rusqlite::params![user_str, data, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get_tierlist(&self, user: UserId) -> Result<Option<TierlistPayload>> {
    let user_str = encode_user_id(user);

    let data: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT data FROM tierlists WHERE user_id = ?1",
              rusqlite::params![user_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(data.map(TierlistPayload::from_stored))
  }

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<Option<User>> {
    let user = User {
      user_id:       UserId::new(),
      username:      input.username,
      password_hash: input.password_hash,
      created_at:    Utc::now(),
    };

    let id_str = encode_user_id(user.user_id);
    let name   = user.username.clone();
    let hash   = user.password_hash.clone();
    let at_str = encode_dt(user.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let outcome = conn.execute(
          "INSERT INTO users (user_id, username, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, hash, at_str],
        );
        // A UNIQUE violation on username means the name is taken.
        match outcome {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(inserted.then_some(user))
  }

  async fn find_user(&self, username: &str) -> Result<Option<User>> {
    let name = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, password_hash, created_at
               FROM users WHERE username = ?1",
              rusqlite::params![name],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
