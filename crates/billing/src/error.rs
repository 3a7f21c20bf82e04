//! Billing error types

use thiserror::Error;

pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum BillingError {
    /// Missing or invalid client configuration
    #[error("billing configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the platform
    #[error("payments request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the call
    #[error("payments API error (status {status}): {message}")]
    Api { status: u16, message: String },
}
