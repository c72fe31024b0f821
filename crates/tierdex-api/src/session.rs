//! Session identity extractor.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tierdex_core::user::UserId;

/// The signed-in user for this request, if any.
///
/// Reads the [`UserId`] that the session layer stored in the request
/// extensions. Never rejects: a request without a session yields
/// `SessionUser(None)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionUser(pub Option<UserId>);

impl<S> FromRequestParts<S> for SessionUser
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    Ok(Self(parts.extensions.get::<UserId>().copied()))
  }
}
