//! Canned gateway for tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{BillingError, BillingResult};
use crate::gateway::{BillingGateway, Plan, Product};

/// In-memory [`BillingGateway`] that fabricates ids.
///
/// Plan creation can be made to fail for chosen prices, which is how tests
/// exercise the swallow-and-continue provisioning path.
#[derive(Default)]
pub struct MockBillingGateway {
    products: AtomicUsize,
    plans: AtomicUsize,
    failing_prices: HashSet<i64>,
}

impl MockBillingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose `create_plan` fails for these minor-unit prices
    pub fn failing_for_prices(prices: impl IntoIterator<Item = i64>) -> Self {
        Self {
            failing_prices: prices.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Products created so far
    pub fn products_created(&self) -> usize {
        self.products.load(Ordering::SeqCst)
    }

    /// Plans created so far
    pub fn plans_created(&self) -> usize {
        self.plans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BillingGateway for MockBillingGateway {
    async fn create_product(
        &self,
        _company_id: &str,
        _title: &str,
        _description: &str,
    ) -> BillingResult<Product> {
        let n = self.products.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Product {
            id: format!("prod_mock_{n}"),
        })
    }

    async fn create_plan(
        &self,
        _company_id: &str,
        _product_id: &str,
        price_minor_units: i64,
    ) -> BillingResult<Plan> {
        if self.failing_prices.contains(&price_minor_units) {
            return Err(BillingError::Api {
                status: 500,
                message: "simulated plan failure".to_string(),
            });
        }

        let n = self.plans.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Plan {
            id: format!("plan_mock_{n}"),
        })
    }
}
