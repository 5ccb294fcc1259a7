// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{normalize_categories, ChildAnswers, ChildContext, ParsedQuery, Product, RankedProduct, Rule};
pub use requests::{
    InsightsRequest, ParseQueryRequest, PlayBoardProductsRequest, RecommendationsRequest,
    ShopSearchRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, InsightsResponse, RankedProductsResponse, ShopSearchResponse,
};
