//! HTTP client for the payments platform
//!
//! Thin reqwest wrapper over the two endpoints provisioning needs: product
//! creation and one-time plan creation. No explicit timeout is set; the
//! transport's defaults apply.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{BillingError, BillingResult};
use crate::gateway::{BillingGateway, Plan, Product};

/// Client configuration
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Base URL of the platform API
    pub api_url: String,
    /// Bearer token for authentication
    pub api_key: String,
}

impl PaymentsConfig {
    /// Create from environment variables
    pub fn from_env() -> BillingResult<Self> {
        let api_url = std::env::var("PAYMENTS_API_URL")
            .map_err(|_| BillingError::Config("PAYMENTS_API_URL not set".into()))?;
        let api_key = std::env::var("PAYMENTS_API_KEY")
            .map_err(|_| BillingError::Config("PAYMENTS_API_KEY not set".into()))?;

        Ok(Self { api_url, api_key })
    }
}

/// Payments platform client
#[derive(Clone)]
pub struct PaymentsClient {
    http: Client,
    config: PaymentsConfig,
}

#[derive(Serialize)]
struct CreateProductBody<'a> {
    company_id: &'a str,
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct CreatePlanBody<'a> {
    company_id: &'a str,
    product_id: &'a str,
    plan_type: &'a str,
    initial_price: i64,
    currency: &'a str,
}

impl PaymentsClient {
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> BillingResult<Self> {
        Ok(Self::new(PaymentsConfig::from_env()?))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> BillingResult<T> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BillingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BillingGateway for PaymentsClient {
    async fn create_product(
        &self,
        company_id: &str,
        title: &str,
        description: &str,
    ) -> BillingResult<Product> {
        self.post_json(
            "/products",
            &CreateProductBody {
                company_id,
                title,
                description,
            },
        )
        .await
    }

    async fn create_plan(
        &self,
        company_id: &str,
        product_id: &str,
        price_minor_units: i64,
    ) -> BillingResult<Plan> {
        self.post_json(
            "/plans",
            &CreatePlanBody {
                company_id,
                product_id,
                plan_type: "one_time",
                initial_price: price_minor_units,
                currency: "usd",
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> PaymentsClient {
        PaymentsClient::new(PaymentsConfig {
            api_url: server.url(),
            api_key: "test-key".to_string(),
        })
    }

    #[tokio::test]
    async fn create_product_posts_expected_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/products")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(json!({
                "company_id": "biz_1",
                "title": "$5 Tip",
                "description": "Support creator with a $5 tip",
            })))
            .with_status(200)
            .with_body(r#"{"id": "prod_123"}"#)
            .create_async()
            .await;

        let product = client_for(&server)
            .create_product("biz_1", "$5 Tip", "Support creator with a $5 tip")
            .await
            .unwrap();

        assert_eq!(product.id, "prod_123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_plan_posts_one_time_usd() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/plans")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(json!({
                "company_id": "biz_1",
                "product_id": "prod_123",
                "plan_type": "one_time",
                "initial_price": 500,
                "currency": "usd",
            })))
            .with_status(200)
            .with_body(r#"{"id": "plan_456"}"#)
            .create_async()
            .await;

        let plan = client_for(&server)
            .create_plan("biz_1", "prod_123", 500)
            .await
            .unwrap();

        assert_eq!(plan.id, "plan_456");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/products")
            .with_status(422)
            .with_body("invalid company")
            .create_async()
            .await;

        let err = client_for(&server)
            .create_product("biz_1", "$5 Tip", "Support creator with a $5 tip")
            .await
            .unwrap_err();

        match err {
            BillingError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid company");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
