//! Tip configuration resource
//!
//! One resource, two operations: fetch a company's tip configuration (or a
//! synthesized default when none is stored) and upsert it, provisioning a
//! payment plan for every tip amount that doesn't have one yet.
//!
//! Upserts are not transactional: the existence check, the provisioning
//! pass and the write run without locking, so concurrent saves for the same
//! company can race and the last write wins.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use tipjar_shared::{
    StoreError, TipConfigChanges, TipConfigRecord, DEFAULT_TIP_AMOUNTS, DEFAULT_WELCOME_MESSAGE,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTipConfigQuery {
    pub company_id: Option<String>,
    pub experience_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTipConfigRequest {
    pub company_id: Option<String>,
    pub experience_id: Option<String>,
    pub tip_amounts: Option<Vec<f64>>,
    pub welcome_message: Option<String>,
}

/// Wire form of a tip configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub company_id: String,
    pub experience_id: String,
    pub tip_amounts: Vec<f64>,
    pub welcome_message: String,
    pub product_ids: HashMap<String, String>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl TipConfigPayload {
    fn from_record(record: TipConfigRecord) -> Self {
        Self {
            id: Some(record.id),
            company_id: record.company_id,
            experience_id: record.experience_id,
            tip_amounts: record.tip_amounts,
            welcome_message: record.welcome_message,
            product_ids: record.product_ids,
            created_at: Some(record.created_at),
            updated_at: Some(record.updated_at),
        }
    }

    /// Synthesized default returned when a company has nothing stored.
    /// Not persisted.
    fn default_for(company_id: String, experience_id: String) -> Self {
        Self {
            id: None,
            company_id,
            experience_id,
            tip_amounts: DEFAULT_TIP_AMOUNTS.to_vec(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            product_ids: HashMap::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FetchTipConfigResponse {
    pub data: TipConfigPayload,
}

#[derive(Debug, Serialize)]
pub struct UpsertTipConfigResponse {
    pub success: bool,
    pub data: TipConfigPayload,
}

/// GET /api/tip-config
pub async fn fetch_tip_config(
    State(state): State<AppState>,
    Query(query): Query<FetchTipConfigQuery>,
) -> ApiResult<Json<FetchTipConfigResponse>> {
    let company_id = match query.company_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ApiError::Validation("Company ID is required".to_string())),
    };

    let existing = state
        .store
        .find_by_company(&company_id)
        .await
        .map_err(|e| fetch_error(&company_id, &e))?;

    let data = match existing {
        Some(record) => TipConfigPayload::from_record(record),
        None => {
            TipConfigPayload::default_for(company_id, query.experience_id.unwrap_or_default())
        }
    };

    Ok(Json(FetchTipConfigResponse { data }))
}

/// POST /api/tip-config
pub async fn upsert_tip_config(
    State(state): State<AppState>,
    payload: Result<Json<UpsertTipConfigRequest>, JsonRejection>,
) -> ApiResult<Json<UpsertTipConfigResponse>> {
    // A body that doesn't deserialize (e.g. tipAmounts not an array) is a
    // caller error, same as missing fields.
    let Ok(Json(body)) = payload else {
        return Err(missing_upsert_fields());
    };

    let company_id = match body.company_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(missing_upsert_fields()),
    };
    let Some(tip_amounts) = body.tip_amounts else {
        return Err(missing_upsert_fields());
    };

    let existing = state
        .store
        .find_by_company(&company_id)
        .await
        .map_err(|e| save_error(&company_id, &e))?;

    let now = OffsetDateTime::now_utc();

    // Carry over already-provisioned plans. Keys are never removed, even
    // when their amount is dropped from the list.
    let mut product_ids = existing
        .as_ref()
        .map(|doc| doc.product_ids.clone())
        .unwrap_or_default();

    let report = state
        .provisioner
        .ensure_plans(&company_id, &tip_amounts, &mut product_ids)
        .await;
    if report.has_failures() {
        tracing::warn!(
            company_id = %company_id,
            created = report.created(),
            failed = report.failed(),
            "Tip plan provisioning incomplete; missing amounts retry on the next save"
        );
    }

    let changes = TipConfigChanges {
        company_id: company_id.clone(),
        experience_id: body.experience_id.unwrap_or_default(),
        tip_amounts,
        welcome_message: body
            .welcome_message
            .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
        product_ids,
        updated_at: now,
    };

    let (id, created_at) = match existing {
        None => {
            let id = state
                .store
                .insert(&changes, now)
                .await
                .map_err(|e| save_error(&company_id, &e))?;
            (id, Some(now))
        }
        Some(doc) => {
            state
                .store
                .update(doc.id, &changes)
                .await
                .map_err(|e| save_error(&company_id, &e))?;
            // The update never carried created_at, so the response doesn't
            // either; the stored value is untouched.
            (doc.id, None)
        }
    };

    Ok(Json(UpsertTipConfigResponse {
        success: true,
        data: TipConfigPayload {
            id: Some(id),
            company_id: changes.company_id,
            experience_id: changes.experience_id,
            tip_amounts: changes.tip_amounts,
            welcome_message: changes.welcome_message,
            product_ids: changes.product_ids,
            created_at,
            updated_at: Some(now),
        },
    }))
}

fn missing_upsert_fields() -> ApiError {
    ApiError::Validation("Company ID and tip amounts are required".to_string())
}

fn fetch_error(company_id: &str, e: &StoreError) -> ApiError {
    tracing::error!(company_id = %company_id, error = ?e, "Error fetching tip config");
    ApiError::Internal("Failed to fetch tip configuration".to_string())
}

fn save_error(company_id: &str, e: &StoreError) -> ApiError {
    tracing::error!(company_id = %company_id, error = ?e, "Error saving tip config");
    ApiError::Internal("Failed to save tip configuration".to_string())
}
