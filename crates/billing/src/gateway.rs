//! Payments platform gateway
//!
//! The platform hosts a product and a purchasable plan per tip amount.
//! `BillingGateway` is the seam the provisioner works against: the real
//! implementation is [`crate::client::PaymentsClient`], tests use
//! [`crate::mock::MockBillingGateway`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BillingResult;

/// Product created on the payments platform
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
}

/// Purchasable plan attached to a product
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub id: String,
}

#[async_trait]
pub trait BillingGateway: Send + Sync {
    /// Create a product owned by the company
    async fn create_product(
        &self,
        company_id: &str,
        title: &str,
        description: &str,
    ) -> BillingResult<Product>;

    /// Create a one-time purchase plan for the product, priced in minor
    /// units of usd
    async fn create_plan(
        &self,
        company_id: &str,
        product_id: &str,
        price_minor_units: i64,
    ) -> BillingResult<Plan>;
}
