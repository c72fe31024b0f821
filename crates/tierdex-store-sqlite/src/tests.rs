//! Integration tests for `SqliteStore` against an in-memory database.

use tierdex_core::{
  pokemon::{GenerationFilter, Pokemon, Ranking, ReferenceData},
  store::TierStore,
  tierlist::TierlistPayload,
  user::{NewUser, UserId},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn pokemon(id: i64, name: &str, generation: i64) -> Pokemon {
  Pokemon {
    id,
    name: name.into(),
    sprite_url: format!("https://sprites.example/{id}.png"),
    generation,
  }
}

fn ranking(pokemon_id: i64, list_id: i64, rank: i64, position: i64) -> Ranking {
  Ranking { pokemon_id, list_id, rank, position }
}

async fn seeded(rankings: Vec<Ranking>) -> SqliteStore {
  let s = store().await;
  s.load_reference_data(ReferenceData {
    pokemon: vec![
      pokemon(25, "Pikachu", 1),
      pokemon(1, "Bulbasaur", 1),
      pokemon(152, "Chikorita", 2),
      pokemon(2, "Charmander", 1),
    ],
    rankings,
  })
  .await
  .unwrap();
  s
}

async fn tierlist_rows(s: &SqliteStore, user: UserId) -> i64 {
  let id = user.to_string();
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(
        "SELECT COUNT(*) FROM tierlists WHERE user_id = ?1",
        rusqlite::params![id],
        |row| row.get(0),
      )?)
    })
    .await
    .unwrap()
}

// ─── Pokémon listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn unranked_pokemon_default_to_zero() {
  let s = seeded(vec![]).await;

  let views = s.list_pokemon(GenerationFilter::Only(1)).await.unwrap();
  let ids: Vec<i64> = views.iter().map(|v| v.id).collect();
  assert_eq!(ids, [1, 2, 25]);
  assert!(views.iter().all(|v| v.rank == 0 && v.position == 0));
  assert_eq!(views[2].name, "Pikachu");
  assert_eq!(views[2].sprite_url, "https://sprites.example/25.png");
}

#[tokio::test]
async fn generation_filter_excludes_other_generations() {
  let s = seeded(vec![]).await;

  let gen2 = s.list_pokemon(GenerationFilter::Only(2)).await.unwrap();
  assert_eq!(gen2.len(), 1);
  assert_eq!(gen2[0].id, 152);

  let gen9 = s.list_pokemon(GenerationFilter::Only(9)).await.unwrap();
  assert!(gen9.is_empty());
}

#[tokio::test]
async fn unfiltered_listing_is_ordered_by_id() {
  let s = seeded(vec![]).await;

  let all = s.list_pokemon(GenerationFilter::All).await.unwrap();
  let ids: Vec<i64> = all.iter().map(|v| v.id).collect();
  assert_eq!(ids, [1, 2, 25, 152]);
}

#[tokio::test]
async fn only_the_default_list_is_joined() {
  let s = seeded(vec![ranking(25, 1, 1, 3), ranking(1, 2, 4, 7)]).await;

  let views = s.list_pokemon(GenerationFilter::Only(1)).await.unwrap();
  let pikachu = views.iter().find(|v| v.id == 25).unwrap();
  assert_eq!((pikachu.rank, pikachu.position), (1, 3));

  // Bulbasaur is ranked only in list 2.
  let bulbasaur = views.iter().find(|v| v.id == 1).unwrap();
  assert_eq!((bulbasaur.rank, bulbasaur.position), (0, 0));

  // Ordering stays by id regardless of ranking.
  let ids: Vec<i64> = views.iter().map(|v| v.id).collect();
  assert_eq!(ids, [1, 2, 25]);
}

#[tokio::test]
async fn reloading_reference_data_updates_in_place() {
  let s = seeded(vec![ranking(25, 1, 1, 3)]).await;

  s.load_reference_data(ReferenceData {
    pokemon:  vec![pokemon(25, "Pikachu (Partner)", 1)],
    rankings: vec![ranking(25, 1, 2, 0)],
  })
  .await
  .unwrap();

  let all = s.list_pokemon(GenerationFilter::All).await.unwrap();
  assert_eq!(all.len(), 4);
  let pikachu = all.iter().find(|v| v.id == 25).unwrap();
  assert_eq!(pikachu.name, "Pikachu (Partner)");
  assert_eq!((pikachu.rank, pikachu.position), (2, 0));
}

#[tokio::test]
async fn ranking_for_unknown_pokemon_rolls_back_the_load() {
  let s = store().await;

  let result = s
    .load_reference_data(ReferenceData {
      pokemon:  vec![pokemon(1, "Bulbasaur", 1)],
      rankings: vec![ranking(999, 1, 1, 1)],
    })
    .await;
  assert!(matches!(result, Err(Error::Database(_))));

  let all = s.list_pokemon(GenerationFilter::All).await.unwrap();
  assert!(all.is_empty());
}

// ─── Tier lists ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_tierlist_missing_returns_none() {
  let s = store().await;
  assert!(s.get_tierlist(UserId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn save_and_get_tierlist() {
  let s = store().await;
  let user = UserId::new();

  let payload = TierlistPayload::new("S-tier:[25],A-tier:[1,2]").unwrap();
  s.save_tierlist(user, payload.clone()).await.unwrap();

  assert_eq!(s.get_tierlist(user).await.unwrap(), Some(payload));
}

#[tokio::test]
async fn second_save_replaces_the_first() {
  let s = store().await;
  let user = UserId::new();

  s.save_tierlist(user, TierlistPayload::new("first").unwrap()).await.unwrap();
  s.save_tierlist(user, TierlistPayload::new("second").unwrap()).await.unwrap();

  let got = s.get_tierlist(user).await.unwrap().unwrap();
  assert_eq!(got.as_str(), "second");
  assert_eq!(tierlist_rows(&s, user).await, 1);
}

#[tokio::test]
async fn tierlists_are_per_user() {
  let s = store().await;
  let alice = UserId::new();
  let bob = UserId::new();

  s.save_tierlist(alice, TierlistPayload::new("alice").unwrap()).await.unwrap();
  s.save_tierlist(bob, TierlistPayload::new("bob").unwrap()).await.unwrap();

  assert_eq!(s.get_tierlist(alice).await.unwrap().unwrap().as_str(), "alice");
  assert_eq!(s.get_tierlist(bob).await.unwrap().unwrap().as_str(), "bob");
}

// ─── Accounts ────────────────────────────────────────────────────────────────

fn new_user(username: &str) -> NewUser {
  NewUser {
    username:      username.into(),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
  }
}

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;

  let created = s.create_user(new_user("ash")).await.unwrap().unwrap();
  let found = s.find_user("ash").await.unwrap().unwrap();

  assert_eq!(found.user_id, created.user_id);
  assert_eq!(found.password_hash, created.password_hash);
}

#[tokio::test]
async fn find_user_missing_returns_none() {
  let s = store().await;
  assert!(s.find_user("gary").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_not_created() {
  let s = store().await;
  s.create_user(new_user("misty")).await.unwrap().unwrap();

  let second = s.create_user(new_user("misty")).await.unwrap();
  assert!(second.is_none());
}
