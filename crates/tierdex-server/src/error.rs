//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{StatusCode, header::InvalidHeaderValue},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid credentials")]
  InvalidCredentials,
  #[error("username taken")]
  UsernameTaken,
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("session secret must be at least {0} bytes")]
  WeakSecret(usize),
  #[error("password hash error: {0}")]
  PasswordHash(String),
  #[error("invalid header: {0}")]
  Header(#[from] InvalidHeaderValue),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials".to_owned()),
      Error::UsernameTaken => (StatusCode::CONFLICT, "username taken".to_owned()),
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      e @ (Error::WeakSecret(_) | Error::PasswordHash(_) | Error::Header(_) | Error::Store(_)) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
