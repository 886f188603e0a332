//! HTTP client for the bakery service.
//!
//! Each call is a single request: no retries, no timeouts. Callers decide
//! what a failure means for the view that issued it.

use async_trait::async_trait;
use bakery_core::{Order, OrderId, PlaceOrder, Product};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{ApiErrorBody, PlaceOrderResponse};

/// The three calls the storefront makes.
///
/// `HttpClient` is the real implementation; tests substitute their own.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /api/products`
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    /// `POST /api/orders`, returning the id the service assigned.
    async fn place_order(&self, order: &PlaceOrder) -> Result<OrderId, ClientError>;

    /// `GET /api/orders/{id}`
    async fn get_order(&self, id: OrderId) -> Result<Order, ClientError>;
}

/// `reqwest`-backed client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    api_url: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.api_url);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("health check failed: {}", e);
                false
            }
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .ok();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StorefrontApi for HttpClient {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = format!("{}/api/products", self.api_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::decode(resp).await
    }

    async fn place_order(&self, order: &PlaceOrder) -> Result<OrderId, ClientError> {
        let url = format!("{}/api/orders", self.api_url);
        let resp = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let placed: PlaceOrderResponse = Self::decode(resp).await?;
        Ok(placed.order_id)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, ClientError> {
        let url = format!("{}/api/orders/{}", self.api_url, id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::decode(resp).await
    }
}
