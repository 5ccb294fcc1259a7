// Core algorithm exports
pub mod age;
pub mod filters;
pub mod insights;
pub mod lexicon;
pub mod query;
pub mod rationale;
pub mod recommender;
pub mod scoring;

pub use age::{age_from_birthday, AgeBand, AgeBounds, ChildAge};
pub use filters::{filter_catalog, matches_shop_filter, ShopFilter, SHOP_CATEGORIES};
pub use insights::{compute_insights, compute_needs};
pub use lexicon::{Lexicon, LexiconError, RuleTable, Tables, DEFAULT_TABLES};
pub use query::{parse_query, QueryParser};
pub use rationale::rationale_for;
pub use recommender::{
    recommend_for_child, score_and_filter_products, InsightResult, RecommendationLimits,
    RecommendationResult, Recommender,
};
pub use scoring::{play_board_relevance, tailored_relevance};
