//! In-memory tip configuration store
//!
//! Keeps documents in insertion order, so duplicate `company_id` lookups
//! resolve to the oldest document, matching the Postgres store's limit-1
//! scan. Used by handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ConfigStore, StoreError, StoreResult};
use crate::models::{TipConfigChanges, TipConfigRecord};

#[derive(Default)]
pub struct MemoryConfigStore {
    docs: Mutex<Vec<TipConfigRecord>>,
    lookups: AtomicUsize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.docs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.lock().await.is_empty()
    }

    /// How many times `find_by_company` has been called
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Snapshot of the first document for a company
    pub async fn get(&self, company_id: &str) -> Option<TipConfigRecord> {
        self.docs
            .lock()
            .await
            .iter()
            .find(|doc| doc.company_id == company_id)
            .cloned()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn find_by_company(&self, company_id: &str) -> StoreResult<Option<TipConfigRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .docs
            .lock()
            .await
            .iter()
            .find(|doc| doc.company_id == company_id)
            .cloned())
    }

    async fn insert(
        &self,
        changes: &TipConfigChanges,
        created_at: OffsetDateTime,
    ) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.docs.lock().await.push(TipConfigRecord {
            id,
            company_id: changes.company_id.clone(),
            experience_id: changes.experience_id.clone(),
            tip_amounts: changes.tip_amounts.clone(),
            welcome_message: changes.welcome_message.clone(),
            product_ids: changes.product_ids.clone(),
            created_at,
            updated_at: changes.updated_at,
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, changes: &TipConfigChanges) -> StoreResult<()> {
        let mut docs = self.docs.lock().await;
        let doc = docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;

        doc.company_id = changes.company_id.clone();
        doc.experience_id = changes.experience_id.clone();
        doc.tip_amounts = changes.tip_amounts.clone();
        doc.welcome_message = changes.welcome_message.clone();
        doc.product_ids = changes.product_ids.clone();
        doc.updated_at = changes.updated_at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn changes_for(company_id: &str) -> TipConfigChanges {
        TipConfigChanges {
            company_id: company_id.to_string(),
            experience_id: String::new(),
            tip_amounts: vec![10.0, 20.0, 50.0],
            welcome_message: "Thanks!".to_string(),
            product_ids: HashMap::new(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn find_returns_first_inserted_duplicate() {
        let store = MemoryConfigStore::new();
        let now = OffsetDateTime::now_utc();

        let mut first = changes_for("biz_1");
        first.welcome_message = "first".to_string();
        let first_id = store.insert(&first, now).await.unwrap();

        let mut second = changes_for("biz_1");
        second.welcome_message = "second".to_string();
        store.insert(&second, now).await.unwrap();

        let found = store.find_by_company("biz_1").await.unwrap().unwrap();
        assert_eq!(found.id, first_id);
        assert_eq!(found.welcome_message, "first");
    }

    #[tokio::test]
    async fn update_preserves_created_at() {
        let store = MemoryConfigStore::new();
        let created = OffsetDateTime::now_utc() - time::Duration::days(3);

        let id = store.insert(&changes_for("biz_1"), created).await.unwrap();

        let mut changes = changes_for("biz_1");
        changes.tip_amounts = vec![5.0];
        changes.updated_at = OffsetDateTime::now_utc();
        store.update(id, &changes).await.unwrap();

        let doc = store.get("biz_1").await.unwrap();
        assert_eq!(doc.created_at, created);
        assert_eq!(doc.tip_amounts, vec![5.0]);
        assert_eq!(doc.updated_at, changes.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryConfigStore::new();
        let missing = Uuid::new_v4();

        let result = store.update(missing, &changes_for("biz_1")).await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn lookup_count_tracks_finds() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.lookup_count(), 0);

        store.find_by_company("biz_1").await.unwrap();
        store.find_by_company("biz_2").await.unwrap();
        assert_eq!(store.lookup_count(), 2);
    }
}
