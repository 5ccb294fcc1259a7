use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::core::ShopFilter;
use crate::models::{
    PlayBoardProductsRequest, RankedProductsResponse, RecommendationsRequest, ShopSearchRequest,
    ShopSearchResponse,
};
use crate::routes::{catalog_unavailable, request_id, validation_failed, AppState, REQUEST_ID_HEADER};

/// Configure product ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/playboard/products", web::post().to(play_board_products))
        .route("/recommendations", web::post().to(recommendations))
        .route("/shop/search", web::post().to(shop_search));
}

/// Play Board picks
///
/// POST /api/v1/playboard/products
///
/// Request body:
/// ```json
/// { "childAge": 3, "schemas": ["building"], "barriers": ["dumps_bins"] }
/// ```
async fn play_board_products(
    state: web::Data<AppState>,
    req: web::Json<PlayBoardProductsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let rid = request_id(&http_req);

    if let Err(errors) = req.validate() {
        return validation_failed(&rid, errors);
    }

    let catalog = match state.cache.get_or_fetch(&state.catalog).await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&rid, e),
    };

    let result = state
        .recommender
        .play_board_products(req.child_age, &req.answers(), &catalog);

    tracing::info!(
        request_id = %rid,
        "Returning {} Play Board picks for age {} (from {} products)",
        result.products.len(),
        req.child_age,
        result.total_candidates
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(RankedProductsResponse {
            products: result.products,
            needs: result.needs,
            total_candidates: result.total_candidates,
        })
}

/// Tailored recommendations for one child
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "child": { "name": "Ivy", "birthday": "2022-06-01" },
///   "answers": { "schemas": ["trajectory"], "barriers": [] }
/// }
/// ```
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let rid = request_id(&http_req);

    if let Err(errors) = req.validate() {
        return validation_failed(&rid, errors);
    }

    let today = chrono::Utc::now().date_naive();

    if req.child.effective_band(today).is_none() {
        tracing::warn!(request_id = %rid, "No age band for {}, skipping recommendations", req.child.name);

        return HttpResponse::Ok()
            .insert_header((REQUEST_ID_HEADER, rid))
            .json(RankedProductsResponse {
                products: Vec::new(),
                needs: state.recommender.insights(&req.answers).needs,
                total_candidates: 0,
            });
    }

    let catalog = match state.cache.get_or_fetch(&state.catalog).await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&rid, e),
    };

    let result = state
        .recommender
        .tailored_products(&req.child, &req.answers, &catalog, today);

    tracing::info!(
        request_id = %rid,
        "Returning {} recommendations for {} (from {} products)",
        result.products.len(),
        req.child.name,
        result.total_candidates
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(RankedProductsResponse {
            products: result.products,
            needs: result.needs,
            total_candidates: result.total_candidates,
        })
}

/// Shop listing with search, category facet, parsed query and age fit
///
/// POST /api/v1/shop/search
async fn shop_search(
    state: web::Data<AppState>,
    req: web::Json<ShopSearchRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let rid = request_id(&http_req);

    if let Err(errors) = req.validate() {
        return validation_failed(&rid, errors);
    }

    let catalog = match state.cache.get_or_fetch(&state.catalog).await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&rid, e),
    };

    let req = req.into_inner();
    let filter = ShopFilter {
        search: req.search,
        category: req.category,
        intent: None,
        child_age: req.child_age,
    };

    let (products, intent) = state
        .recommender
        .shop(&catalog, filter, req.query.as_deref());
    let products: Vec<_> = products.into_iter().cloned().collect();

    tracing::info!(
        request_id = %rid,
        "Shop search matched {} of {} products",
        products.len(),
        catalog.len()
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, rid))
        .json(ShopSearchResponse {
            total_results: products.len(),
            products,
            intent,
        })
}
