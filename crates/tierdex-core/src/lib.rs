//! Core types and trait definitions for the Tierdex tier-list backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// Store implementations use native `async fn` for the trait's
// `impl Future` methods.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod pokemon;
pub mod store;
pub mod tierlist;
pub mod user;

pub use error::{Error, Result};
