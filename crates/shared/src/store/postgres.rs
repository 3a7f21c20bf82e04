//! Postgres-backed tip configuration store

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{ConfigStore, StoreError, StoreResult};
use crate::models::{TipConfigChanges, TipConfigRecord};

/// Store backed by the `tip_configs` table
#[derive(Clone)]
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TipConfigRow {
    id: Uuid,
    company_id: String,
    experience_id: String,
    tip_amounts: Json<Vec<f64>>,
    welcome_message: String,
    product_ids: Json<HashMap<String, String>>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<TipConfigRow> for TipConfigRecord {
    fn from(row: TipConfigRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            experience_id: row.experience_id,
            tip_amounts: row.tip_amounts.0,
            welcome_message: row.welcome_message,
            product_ids: row.product_ids.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn find_by_company(&self, company_id: &str) -> StoreResult<Option<TipConfigRecord>> {
        // No ORDER BY: which duplicate wins is store-defined, same as a
        // filter-with-limit lookup against a document collection.
        let row: Option<TipConfigRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, experience_id, tip_amounts,
                   welcome_message, product_ids, created_at, updated_at
            FROM tip_configs
            WHERE company_id = $1
            LIMIT 1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TipConfigRecord::from))
    }

    async fn insert(
        &self,
        changes: &TipConfigChanges,
        created_at: OffsetDateTime,
    ) -> StoreResult<Uuid> {
        let record: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO tip_configs (
                company_id,
                experience_id,
                tip_amounts,
                welcome_message,
                product_ids,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&changes.company_id)
        .bind(&changes.experience_id)
        .bind(Json(&changes.tip_amounts))
        .bind(&changes.welcome_message)
        .bind(Json(&changes.product_ids))
        .bind(created_at)
        .bind(changes.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.0)
    }

    async fn update(&self, id: Uuid, changes: &TipConfigChanges) -> StoreResult<()> {
        // created_at is not in the column list: updates never rewrite it.
        let result = sqlx::query(
            r#"
            UPDATE tip_configs
            SET company_id = $2,
                experience_id = $3,
                tip_amounts = $4,
                welcome_message = $5,
                product_ids = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.company_id)
        .bind(&changes.experience_id)
        .bind(Json(&changes.tip_amounts))
        .bind(&changes.welcome_message)
        .bind(Json(&changes.product_ids))
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
