// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Tipjar Shared
//!
//! Models and storage shared across the workspace: the tip configuration
//! document, the store abstraction over it, and database pool helpers.

pub mod db;
pub mod models;
pub mod store;

pub use db::{create_pool, run_migrations};
pub use models::{
    TipConfigChanges, TipConfigRecord, DEFAULT_TIP_AMOUNTS, DEFAULT_WELCOME_MESSAGE,
};
pub use store::{ConfigStore, MemoryConfigStore, PgConfigStore, StoreError, StoreResult};
