//! Play Board engine - query parsing, developmental insights and product
//! recommendations for the Play Board app.
//!
//! The `core` module is pure and synchronous; `routes` and `services` wrap it
//! in an actix-web service backed by the product catalog API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    compute_insights, compute_needs, filter_catalog, parse_query, rationale_for,
    recommend_for_child, score_and_filter_products, AgeBand, AgeBounds, Recommender,
};
pub use crate::models::{ChildAnswers, ChildContext, ParsedQuery, Product, RankedProduct};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let parsed = parse_query("toddler who loves lego");
        assert!(parsed.has_results);
        assert_eq!(parsed.age_range.as_deref(), Some(AgeBand::EighteenMonthsToThree.label()));
    }
}
