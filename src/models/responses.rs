use serde::{Deserialize, Serialize};

use crate::models::domain::{ParsedQuery, Product, RankedProduct};

/// Insights and needs for a set of onboarding answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: Vec<String>,
    pub needs: Vec<String>,
}

/// Ranked product list (Play Board picks or tailored recommendations)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProductsResponse {
    pub products: Vec<RankedProduct>,
    pub needs: Vec<String>,
    pub total_candidates: usize,
}

/// Shop listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSearchResponse {
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<ParsedQuery>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
