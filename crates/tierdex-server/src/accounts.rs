//! Account routes: register, log in, log out.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"username","password"}`; 409 if taken; signs in |
//! | `POST` | `/login`    | Body: `{"username","password"}`; 401 on mismatch |
//! | `GET`  | `/logout`   | Clears the session cookie |

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
  Json,
  body::Bytes,
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use rand_core::OsRng;
use serde::Deserialize;
use serde_json::json;
use tierdex_core::{
  store::TierStore,
  user::{NewUser, UserId},
};

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
pub struct Credentials {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

impl Credentials {
  /// Parse a request body regardless of its `Content-Type`.
  fn parse(body: &[u8]) -> Result<Self, Error> {
    serde_json::from_slice(body)
      .map_err(|_| Error::BadRequest("expected a JSON body with username and password".to_owned()))
  }

  fn validate(self) -> Result<(String, String), Error> {
    let username = self.username.trim().to_owned();
    if username.is_empty() || self.password.is_empty() {
      return Err(Error::BadRequest("username and password are required".to_owned()));
    }
    Ok((username, self.password))
  }
}

/// `POST /register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Response, Error>
where
  S: TierStore + Clone + 'static,
{
  let (username, password) = Credentials::parse(&body)?.validate()?;

  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| Error::PasswordHash(e.to_string()))?
    .to_string();

  let user = state
    .store
    .create_user(NewUser { username, password_hash })
    .await
    .map_err(Error::store)?
    .ok_or(Error::UsernameTaken)?;

  tracing::info!(user = %user.user_id, username = %user.username, "registered user");
  signed_in(&state, user.user_id)
}

/// `POST /login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Response, Error>
where
  S: TierStore + Clone + 'static,
{
  let (username, password) = Credentials::parse(&body)?.validate()?;

  let user = state
    .store
    .find_user(&username)
    .await
    .map_err(Error::store)?
    .ok_or(Error::InvalidCredentials)?;

  let parsed_hash =
    PasswordHash::new(&user.password_hash).map_err(|_| Error::InvalidCredentials)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::InvalidCredentials)?;

  tracing::info!(user = %user.user_id, "logged in");
  signed_in(&state, user.user_id)
}

/// `GET /logout`
pub async fn logout() -> Response {
  (
    [(header::SET_COOKIE, crate::session::clear_cookie())],
    Json(json!({ "success": true })),
  )
    .into_response()
}

fn signed_in<S>(state: &AppState<S>, user: UserId) -> Result<Response, Error>
where
  S: TierStore,
{
  let cookie = state.session.set_cookie(user, Utc::now())?;
  Ok(([(header::SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response())
}
