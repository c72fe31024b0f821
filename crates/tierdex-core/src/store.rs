//! The `TierStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tierdex-store-sqlite`).
//! Higher layers (`tierdex-api`, `tierdex-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  pokemon::{GenerationFilter, PokemonView, ReferenceData},
  tierlist::TierlistPayload,
  user::{NewUser, User, UserId},
};

/// Abstraction over a Tierdex store backend.
///
/// Every method is a single statement or a single transaction; nothing is
/// held open between calls. All methods return `Send` futures so the trait
/// can be used in multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TierStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Pokémon ───────────────────────────────────────────────────────────

  /// Pokémon matching `filter`, left-joined against the default ranking
  /// list and ordered by ascending id.
  fn list_pokemon(
    &self,
    filter: GenerationFilter,
  ) -> impl Future<Output = Result<Vec<PokemonView>, Self::Error>> + Send + '_;

  /// Upsert Pokémon and rankings in one transaction. Either every row is
  /// written or none is.
  fn load_reference_data(
    &self,
    data: ReferenceData,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Tier lists ────────────────────────────────────────────────────────

  /// Insert the user's tier list, or replace it wholesale if one exists.
  fn save_tierlist(
    &self,
    user: UserId,
    payload: TierlistPayload,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The user's stored tier list, or `None` if they never saved one.
  fn get_tierlist(
    &self,
    user: UserId,
  ) -> impl Future<Output = Result<Option<TierlistPayload>, Self::Error>> + Send + '_;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Persist a new account. Returns `None` if the username is already taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up an account by username. Returns `None` if not found.
  fn find_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;
}
