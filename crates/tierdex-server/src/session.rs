//! Signed-cookie sessions.
//!
//! The cookie carries `<payload>.<signature>` where `payload` is the
//! base64url encoding of `"{user_id}:{expires_unix}"` and `signature` is the
//! hex HMAC-SHA256 of the payload under the server secret. Anything that
//! fails to verify is treated as "no session".

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::{HeaderMap, HeaderValue, header},
  middleware::Next,
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tierdex_core::user::UserId;

use crate::error::Error;

pub const COOKIE_NAME: &str = "tierdex_session";

/// Shortest secret accepted for signing cookies.
pub const MIN_SECRET_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies session cookies.
#[derive(Clone)]
pub struct SessionKey {
  mac: HmacSha256,
  ttl: TimeDelta,
}

impl SessionKey {
  pub fn new(secret: &[u8], ttl: TimeDelta) -> Result<Self, Error> {
    if secret.len() < MIN_SECRET_LEN {
      return Err(Error::WeakSecret(MIN_SECRET_LEN));
    }
    let mac = HmacSha256::new_from_slice(secret).map_err(|_| Error::WeakSecret(MIN_SECRET_LEN))?;
    Ok(Self { mac, ttl })
  }

  /// Signed cookie value identifying `user` until `now + ttl`.
  pub fn issue(&self, user: UserId, now: DateTime<Utc>) -> String {
    let expires = (now + self.ttl).timestamp();
    let payload = B64.encode(format!("{user}:{expires}"));
    let mut mac = self.mac.clone();
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{payload}.{signature}")
  }

  /// The user a cookie value identifies, if it is authentic and unexpired.
  pub fn verify(&self, value: &str, now: DateTime<Utc>) -> Option<UserId> {
    let (payload, signature) = value.split_once('.')?;
    let signature = hex::decode(signature).ok()?;

    let mut mac = self.mac.clone();
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    let decoded = B64.decode(payload).ok()?;
    let (user, expires) = std::str::from_utf8(&decoded).ok()?.split_once(':')?;
    let expires: i64 = expires.parse().ok()?;
    if now.timestamp() >= expires {
      return None;
    }
    user.parse().ok()
  }

  /// `Set-Cookie` value that signs `user` in.
  pub fn set_cookie(&self, user: UserId, now: DateTime<Utc>) -> Result<HeaderValue, Error> {
    let value = self.issue(user, now);
    let max_age = self.ttl.num_seconds();
    Ok(HeaderValue::from_str(&format!(
      "{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    ))?)
  }
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie() -> HeaderValue {
  HeaderValue::from_static("tierdex_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Raw session cookie value from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap) -> Option<&str> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .find_map(|pair| {
      let (name, value) = pair.trim().split_once('=')?;
      (name == COOKIE_NAME).then_some(value)
    })
}

/// Middleware: resolve the session cookie and expose the user to handlers
/// through the request extensions.
pub async fn resolve(
  State(key): State<Arc<SessionKey>>,
  mut req: Request,
  next: Next,
) -> Response {
  let user = cookie_value(req.headers()).and_then(|v| key.verify(v, Utc::now()));
  if let Some(user) = user {
    req.extensions_mut().insert(user);
  }
  next.run(req).await
}
