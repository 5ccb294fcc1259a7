// Route exports
pub mod products;
pub mod query;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::core::Recommender;
use crate::models::ErrorResponse;
use crate::services::{CatalogCache, CatalogClient, CatalogError};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CatalogCache>,
}

impl AppState {
    pub fn new(recommender: Recommender, catalog: CatalogClient, cache: CatalogCache) -> Self {
        Self {
            recommender,
            catalog: Arc::new(catalog),
            cache: Arc::new(cache),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(query::configure)
            .configure(products::configure),
    );
}

/// Caller-supplied request id, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

pub(crate) fn validation_failed(rid: &str, errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!(request_id = %rid, "Validation failed: {}", errors);
    HttpResponse::BadRequest()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        })
}

pub(crate) fn catalog_unavailable(rid: &str, err: CatalogError) -> HttpResponse {
    tracing::error!(request_id = %rid, "Failed to fetch catalog: {}", err);
    HttpResponse::BadGateway()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(ErrorResponse {
            error: "Failed to fetch catalog".to_string(),
            message: err.to_string(),
            status_code: 502,
        })
}
