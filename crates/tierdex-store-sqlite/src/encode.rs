//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use tierdex_core::{
  pokemon::PokemonView,
  user::{User, UserId},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── UserId ───────────────────────────────────────────────────────────────────

pub fn encode_user_id(id: UserId) -> String { id.0.hyphenated().to_string() }

pub fn decode_user_id(s: &str) -> Result<UserId> { Ok(UserId(Uuid::parse_str(s)?)) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row mappers ──────────────────────────────────────────────────────────────

/// Map a row of `id, name, sprite_url, rank, position`.
pub fn pokemon_view_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PokemonView> {
  Ok(PokemonView {
    id:         row.get(0)?,
    name:       row.get(1)?,
    sprite_url: row.get(2)?,
    rank:       row.get(3)?,
    position:   row.get(4)?,
  })
}

/// Undecoded `users` row, as read inside a connection closure.
pub struct RawUser {
  pub user_id:       String,
  pub username:      String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:       row.get(0)?,
      username:      row.get(1)?,
      password_hash: row.get(2)?,
      created_at:    row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_user_id(&self.user_id)?,
      username:      self.username,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
