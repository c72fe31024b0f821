//! Per-user tier-list persistence.
//!
//! A tier list is an opaque payload owned by the client. The server checks
//! only that one was sent; it never parses or validates its structure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result, store::TierStore, user::UserId};

/// The stored tier-list arrangement. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierlistPayload(String);

impl TierlistPayload {
  /// Wrap a payload string, rejecting the empty string.
  pub fn new(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.is_empty() {
      return Err(Error::InvalidInput("no data"));
    }
    Ok(Self(raw))
  }

  /// Build a payload from the `tierlist` field of a request body.
  ///
  /// Missing and falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) are
  /// rejected. Strings are kept verbatim; any other value is kept as its
  /// compact JSON text.
  pub fn from_json(value: Option<&Value>) -> Result<Self> {
    let value = value.filter(|v| is_truthy(v)).ok_or(Error::InvalidInput("no data"))?;
    match value {
      Value::String(s) => Self::new(s.as_str()),
      other => Self::new(other.to_string()),
    }
  }

  /// Rehydrate a payload read back from storage.
  pub fn from_stored(data: String) -> Self { Self(data) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}

/// Save `raw` as the tier list of `user`, replacing any previous one, and
/// return the user it was saved for.
///
/// Identity is checked before content, and both before the store is touched.
pub async fn save<S>(store: &S, user: Option<UserId>, raw: Option<&Value>) -> Result<UserId>
where
  S: TierStore,
{
  let user = user.ok_or(Error::Unauthenticated)?;
  let payload = TierlistPayload::from_json(raw)?;
  store.save_tierlist(user, payload).await.map_err(Error::storage)?;
  Ok(user)
}

/// Fetch the tier list of `user`.
///
/// An absent session and a user who never saved both yield `None`.
pub async fn get<S>(store: &S, user: Option<UserId>) -> Result<Option<TierlistPayload>>
where
  S: TierStore,
{
  let Some(user) = user else {
    return Ok(None);
  };
  store.get_tierlist(user).await.map_err(Error::storage)
}

#[cfg(test)]
mod tests {
  use std::{collections::HashMap, convert::Infallible, sync::Mutex};

  use serde_json::json;

  use super::*;
  use crate::{
    pokemon::{GenerationFilter, PokemonView, ReferenceData},
    user::{NewUser, User},
  };

  // Keeps tier lists in a map; everything else is unused here.
  #[derive(Default)]
  struct MemoryStore {
    tierlists: Mutex<HashMap<UserId, TierlistPayload>>,
  }

  impl TierStore for MemoryStore {
    type Error = Infallible;
    async fn list_pokemon(&self, _: GenerationFilter) -> Result<Vec<PokemonView>, Infallible> { unimplemented!() }
    async fn load_reference_data(&self, _: ReferenceData) -> Result<(), Infallible> { unimplemented!() }
    async fn save_tierlist(&self, user: UserId, payload: TierlistPayload) -> Result<(), Infallible> {
      self.tierlists.lock().unwrap().insert(user, payload);
      Ok(())
    }
    async fn get_tierlist(&self, user: UserId) -> Result<Option<TierlistPayload>, Infallible> {
      Ok(self.tierlists.lock().unwrap().get(&user).cloned())
    }
    async fn create_user(&self, _: NewUser) -> Result<Option<User>, Infallible> { unimplemented!() }
    async fn find_user<'a>(&'a self, _: &'a str) -> Result<Option<User>, Infallible> { unimplemented!() }
  }

  #[test]
  fn falsy_values_are_rejected() {
    for v in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
      assert!(
        matches!(TierlistPayload::from_json(Some(&v)), Err(Error::InvalidInput(_))),
        "{v} should be rejected"
      );
    }
    assert!(matches!(TierlistPayload::from_json(None), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn strings_are_kept_verbatim() {
    let v = json!("S-tier:[25],A-tier:[1,2]");
    let p = TierlistPayload::from_json(Some(&v)).unwrap();
    assert_eq!(p.as_str(), "S-tier:[25],A-tier:[1,2]");

    // The client clears its list by saving the string "{}", which is truthy.
    let p = TierlistPayload::from_json(Some(&json!("{}"))).unwrap();
    assert_eq!(p.as_str(), "{}");
  }

  #[test]
  fn non_string_values_are_kept_as_json_text() {
    let v = json!({"S": [25]});
    let p = TierlistPayload::from_json(Some(&v)).unwrap();
    assert_eq!(p.as_str(), r#"{"S":[25]}"#);
  }

  #[tokio::test]
  async fn get_without_prior_save_is_none() {
    let store = MemoryStore::default();
    assert!(get(&store, Some(UserId::new())).await.unwrap().is_none());
    assert!(get(&store, None).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn save_then_get_round_trips() {
    let store = MemoryStore::default();
    let user = UserId::new();
    let saved_for = save(&store, Some(user), Some(&json!("S-tier:[25],A-tier:[1,2]"))).await.unwrap();
    assert_eq!(saved_for, user);
    let got = get(&store, Some(user)).await.unwrap().unwrap();
    assert_eq!(got.as_str(), "S-tier:[25],A-tier:[1,2]");
  }

  #[tokio::test]
  async fn save_without_user_does_not_touch_store() {
    let store = MemoryStore::default();
    let err = save(&store, None, Some(&json!("x"))).await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
    assert!(store.tierlists.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn unauthenticated_is_reported_before_invalid_input() {
    let store = MemoryStore::default();
    let err = save(&store, None, None).await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
  }

  #[tokio::test]
  async fn empty_save_keeps_previous_payload() {
    let store = MemoryStore::default();
    let user = UserId::new();
    save(&store, Some(user), Some(&json!("first"))).await.unwrap();

    let err = save(&store, Some(user), Some(&json!(""))).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let got = get(&store, Some(user)).await.unwrap().unwrap();
    assert_eq!(got.as_str(), "first");
  }
}
