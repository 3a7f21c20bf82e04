// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tipjar Billing
//!
//! Payments-platform integration: a gateway trait with an HTTP client
//! implementation, and the provisioner that keeps a company's tip amounts
//! backed by one-time purchase plans.

pub mod client;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod provision;

pub use client::{PaymentsClient, PaymentsConfig};
pub use error::{BillingError, BillingResult};
pub use gateway::{BillingGateway, Plan, Product};
pub use mock::MockBillingGateway;
pub use provision::{
    amount_key, to_minor_units, AmountOutcome, PlanProvisioner, ProvisionOutcome, ProvisionReport,
};
