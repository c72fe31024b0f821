//! Error types for `tierdex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The operation requires a session identity and none was supplied.
  #[error("not logged in")]
  Unauthenticated,

  /// Request content was missing or empty where content is required.
  #[error("invalid input: {0}")]
  InvalidInput(&'static str),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as [`Error::Storage`].
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
