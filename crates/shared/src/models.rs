//! Tip configuration models

use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

/// Tip amounts offered when a company has not saved a configuration yet
pub const DEFAULT_TIP_AMOUNTS: [f64; 3] = [10.0, 20.0, 50.0];

/// Welcome message used when none was configured
pub const DEFAULT_WELCOME_MESSAGE: &str = "Thank you for your support! 🙏";

/// A persisted tip configuration document.
///
/// One document per company by convention; the store does not enforce it.
#[derive(Debug, Clone, PartialEq)]
pub struct TipConfigRecord {
    pub id: Uuid,
    pub company_id: String,
    pub experience_id: String,
    /// Tip denominations in the order the company configured them
    pub tip_amounts: Vec<f64>,
    pub welcome_message: String,
    /// Stringified tip amount -> billing plan id. Entries are never removed,
    /// even when their amount is dropped from `tip_amounts`.
    pub product_ids: HashMap<String, String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// The fields an upsert writes.
///
/// `created_at` is deliberately absent: updates must never touch it.
/// Inserts receive it as a separate argument.
#[derive(Debug, Clone)]
pub struct TipConfigChanges {
    pub company_id: String,
    pub experience_id: String,
    pub tip_amounts: Vec<f64>,
    pub welcome_message: String,
    pub product_ids: HashMap<String, String>,
    pub updated_at: OffsetDateTime,
}
