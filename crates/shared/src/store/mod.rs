//! Tip configuration store
//!
//! Abstraction over the document store holding tip configurations, so
//! handlers receive an injected handle instead of reaching for a
//! process-global client.

mod memory;
mod postgres;

pub use memory::MemoryConfigStore;
pub use postgres::PgConfigStore;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{TipConfigChanges, TipConfigRecord};

/// Store-level failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("tip config {0} not found")]
    NotFound(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-store operations used by the tip-config resource.
///
/// Lookup is by `company_id` equality with limit 1. Uniqueness of
/// `company_id` is a convention, not a constraint: when duplicates exist
/// the store returns whichever document it considers first.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// First document whose `company_id` equals the input, if any
    async fn find_by_company(&self, company_id: &str) -> StoreResult<Option<TipConfigRecord>>;

    /// Insert a new document and return its assigned id
    async fn insert(
        &self,
        changes: &TipConfigChanges,
        created_at: OffsetDateTime,
    ) -> StoreResult<Uuid>;

    /// Overwrite the listed fields of an existing document.
    ///
    /// Only the fields carried by `changes` are touched; `created_at` and
    /// anything else on the stored document stay as they are.
    async fn update(&self, id: Uuid, changes: &TipConfigChanges) -> StoreResult<()>;
}
