use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{HealthResponse, InsightsRequest, InsightsResponse, ParseQueryRequest};
use crate::routes::{request_id, validation_failed, AppState, REQUEST_ID_HEADER};

/// Configure query and insight routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/query/parse", web::post().to(parse_query))
        .route("/insights", web::post().to(insights));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.cache.stats();
    tracing::debug!("Health check, cached catalogs: {}", stats.entries);

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Parse a free-text shop query
///
/// POST /api/v1/query/parse
///
/// Request body:
/// ```json
/// { "query": "toddler who loves dinosaurs" }
/// ```
async fn parse_query(
    state: web::Data<AppState>,
    req: web::Json<ParseQueryRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let rid = request_id(&http_req);

    if let Err(errors) = req.validate() {
        return validation_failed(&rid, errors);
    }

    let parsed = state.recommender.parse_query(&req.query);

    tracing::info!(
        request_id = %rid,
        "Parsed query: age_range={:?}, {} categories, has_results={}",
        parsed.age_range,
        parsed.categories.len(),
        parsed.has_results
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(parsed)
}

/// Insights for onboarding answers
///
/// POST /api/v1/insights
///
/// Request body:
/// ```json
/// { "schemas": ["building"], "barriers": ["dumps_bins"] }
/// ```
async fn insights(
    state: web::Data<AppState>,
    req: web::Json<InsightsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let rid = request_id(&http_req);

    if let Err(errors) = req.validate() {
        return validation_failed(&rid, errors);
    }

    let result = state.recommender.insights(&req.answers());

    tracing::info!(
        request_id = %rid,
        "Computed {} insights from {} needs",
        result.insights.len(),
        result.needs.len()
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(InsightsResponse {
            insights: result.insights,
            needs: result.needs,
        })
}
