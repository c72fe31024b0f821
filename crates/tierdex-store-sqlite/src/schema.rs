//! SQL schema for the Tierdex SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision; future migrations will be gated on that number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference data, written only by the seed loader.
CREATE TABLE IF NOT EXISTS pokemon (
    id          INTEGER PRIMARY KEY,
    name        TEXT    NOT NULL,
    sprite_url  TEXT    NOT NULL,
    generation  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS rankings (
    pokemon_id  INTEGER NOT NULL REFERENCES pokemon(id),
    list_id     INTEGER NOT NULL,
    rank        INTEGER NOT NULL,
    position    INTEGER NOT NULL,
    PRIMARY KEY (pokemon_id, list_id)
);

CREATE TABLE IF NOT EXISTS users (
    user_id        TEXT PRIMARY KEY,
    username       TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,   -- argon2 PHC string
    created_at     TEXT NOT NULL
);

-- One row per user. user_id is the session identity; it is deliberately not
-- a foreign key so the table does not depend on how sessions are issued.
CREATE TABLE IF NOT EXISTS tierlists (
    user_id     TEXT NOT NULL UNIQUE,
    data        TEXT NOT NULL,      -- opaque client payload
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS pokemon_generation_idx ON pokemon(generation);

PRAGMA user_version = 1;
";
