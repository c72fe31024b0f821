//! User identity and account records.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a signed-in user, as carried by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for UserId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for UserId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Uuid::parse_str(s).map(Self) }
}

/// A registered account. The password hash is a PHC string and never leaves
/// the server, so this type is not serialisable.
#[derive(Debug, Clone)]
pub struct User {
  pub user_id:       UserId,
  pub username:      String,
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`TierStore::create_user`](crate::store::TierStore::create_user).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
}
