use crate::models::Product;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Catalog returned status {0}")]
    ApiError(reqwest::StatusCode),

    #[error("Invalid catalog payload: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Failure of a fetch shared by every caller waiting on it
    #[error("{0}")]
    Shared(Arc<CatalogError>),
}

/// Client for the product catalog API (`GET /api/products`)
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every product in the catalog
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/api/products", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching catalog from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(response.status()));
        }

        let body = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&body)?;

        tracing::debug!("Fetched {} products", products.len());
        Ok(products)
    }
}
