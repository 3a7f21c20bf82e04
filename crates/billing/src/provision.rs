//! Tip plan provisioning
//!
//! For each requested tip amount without a recorded plan, creates a product
//! and a one-time plan on the payments platform. Failures are isolated per
//! amount: the pass keeps going and the report says what happened to each
//! amount, so callers can log or assert partial outcomes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BillingResult;
use crate::gateway::BillingGateway;

/// What happened to a single tip amount
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    /// A new product and plan were created
    Created { plan_id: String },
    /// A plan id was already recorded for this amount
    AlreadyProvisioned,
    /// Creation failed; the amount keeps no plan id and is retried by the
    /// next upsert
    Failed { error: String },
}

/// Per-amount result of a provisioning pass
#[derive(Debug, Clone)]
pub struct AmountOutcome {
    pub amount: f64,
    pub outcome: ProvisionOutcome,
}

/// Result of one provisioning pass over a tip amount list
#[derive(Debug, Clone, Default)]
pub struct ProvisionReport {
    pub outcomes: Vec<AmountOutcome>,
}

impl ProvisionReport {
    /// Amounts that got a new plan this pass
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, ProvisionOutcome::Created { .. }))
            .count()
    }

    /// Amounts whose provisioning failed this pass
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, ProvisionOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Key under which an amount's plan id is recorded in `product_ids`
pub fn amount_key(amount: f64) -> String {
    amount.to_string()
}

/// Convert a tip amount in whole currency units to minor units
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Creates products and plans for tip amounts
pub struct PlanProvisioner {
    gateway: Arc<dyn BillingGateway>,
}

impl PlanProvisioner {
    pub fn new(gateway: Arc<dyn BillingGateway>) -> Self {
        Self { gateway }
    }

    /// Ensure every amount has a plan id recorded in `product_ids`.
    ///
    /// Amounts are processed one at a time, in order. An amount whose key is
    /// already present is skipped. A failed amount is logged, left out of
    /// `product_ids`, and does not stop the pass.
    pub async fn ensure_plans(
        &self,
        company_id: &str,
        amounts: &[f64],
        product_ids: &mut HashMap<String, String>,
    ) -> ProvisionReport {
        let mut report = ProvisionReport::default();

        for &amount in amounts {
            let key = amount_key(amount);
            if product_ids.contains_key(&key) {
                report.outcomes.push(AmountOutcome {
                    amount,
                    outcome: ProvisionOutcome::AlreadyProvisioned,
                });
                continue;
            }

            match self.create_tip_plan(company_id, amount).await {
                Ok(plan_id) => {
                    product_ids.insert(key, plan_id.clone());
                    report.outcomes.push(AmountOutcome {
                        amount,
                        outcome: ProvisionOutcome::Created { plan_id },
                    });
                }
                Err(e) => {
                    tracing::error!(
                        company_id = %company_id,
                        amount = amount,
                        error = %e,
                        "Failed to provision tip plan"
                    );
                    report.outcomes.push(AmountOutcome {
                        amount,
                        outcome: ProvisionOutcome::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        report
    }

    async fn create_tip_plan(&self, company_id: &str, amount: f64) -> BillingResult<String> {
        tracing::info!(company_id = %company_id, amount = amount, "Creating tip product");

        let product = self
            .gateway
            .create_product(
                company_id,
                &format!("${amount} Tip"),
                &format!("Support creator with a ${amount} tip"),
            )
            .await?;

        let plan = self
            .gateway
            .create_plan(company_id, &product.id, to_minor_units(amount))
            .await?;

        Ok(plan.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBillingGateway;

    #[test]
    fn amount_key_drops_trailing_zero() {
        assert_eq!(amount_key(5.0), "5");
        assert_eq!(amount_key(7.5), "7.5");
        assert_eq!(amount_key(100.0), "100");
    }

    #[test]
    fn minor_unit_conversion_rounds() {
        assert_eq!(to_minor_units(5.0), 500);
        assert_eq!(to_minor_units(7.5), 750);
        assert_eq!(to_minor_units(0.99), 99);
    }

    #[tokio::test]
    async fn provisions_each_new_amount() {
        let gateway = Arc::new(MockBillingGateway::new());
        let provisioner = PlanProvisioner::new(gateway.clone());
        let mut product_ids = HashMap::new();

        let report = provisioner
            .ensure_plans("biz_1", &[5.0, 10.0], &mut product_ids)
            .await;

        assert_eq!(report.created(), 2);
        assert_eq!(report.failed(), 0);
        assert_eq!(gateway.products_created(), 2);
        assert_eq!(gateway.plans_created(), 2);
        assert!(product_ids.contains_key("5"));
        assert!(product_ids.contains_key("10"));
    }

    #[tokio::test]
    async fn skips_amounts_already_recorded() {
        let gateway = Arc::new(MockBillingGateway::new());
        let provisioner = PlanProvisioner::new(gateway.clone());
        let mut product_ids = HashMap::from([("5".to_string(), "plan_old".to_string())]);

        let report = provisioner
            .ensure_plans("biz_1", &[5.0, 10.0], &mut product_ids)
            .await;

        assert_eq!(report.created(), 1);
        assert_eq!(gateway.products_created(), 1);
        assert_eq!(product_ids["5"], "plan_old");
        assert!(matches!(
            report.outcomes[0].outcome,
            ProvisionOutcome::AlreadyProvisioned
        ));
    }

    #[tokio::test]
    async fn failure_does_not_stop_the_pass() {
        let gateway = Arc::new(MockBillingGateway::failing_for_prices([1000]));
        let provisioner = PlanProvisioner::new(gateway.clone());
        let mut product_ids = HashMap::new();

        let report = provisioner
            .ensure_plans("biz_1", &[5.0, 10.0, 50.0], &mut product_ids)
            .await;

        assert_eq!(report.created(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert!(product_ids.contains_key("5"));
        assert!(!product_ids.contains_key("10"));
        assert!(product_ids.contains_key("50"));
        assert!(matches!(
            report.outcomes[1].outcome,
            ProvisionOutcome::Failed { .. }
        ));
    }
}
