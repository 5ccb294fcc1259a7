use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::{
    age::AgeBounds,
    filters::{filter_catalog, fits_age_months, ShopFilter},
    insights::{insights_from_rules, needs_from_rules},
    lexicon::Tables,
    query::QueryParser,
    rationale::rationale_for,
    scoring::{play_board_relevance, tailored_relevance},
};
use crate::models::{ChildAnswers, ChildContext, ParsedQuery, Product, RankedProduct};

/// Play Board picks shown per child
pub const PLAY_BOARD_LIMIT: usize = 6;

/// Tailored recommendations shown per child
pub const TAILORED_LIMIT: usize = 12;

/// Result of a ranking run
#[derive(Debug)]
pub struct RecommendationResult {
    pub products: Vec<RankedProduct>,
    pub needs: Vec<String>,
    pub total_candidates: usize,
}

/// Insights and the needs behind them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightResult {
    pub insights: Vec<String>,
    pub needs: Vec<String>,
}

/// How many products each list keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub play_board: usize,
    pub tailored: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            play_board: PLAY_BOARD_LIMIT,
            tailored: TAILORED_LIMIT,
        }
    }
}

/// Play Board picks: parse age span, score against needs, drop products the
/// child is outside of, stable sort by score, keep the first `limit`.
pub fn rank_play_board(
    child_age: u32,
    needs: &[String],
    catalog: &[Product],
    limit: usize,
) -> Vec<RankedProduct> {
    let age = child_age as f64;

    let mut ranked: Vec<RankedProduct> = catalog
        .iter()
        .map(|product| {
            let bounds = AgeBounds::parse_or(product.age_range.as_deref(), AgeBounds::ALL_AGES);
            RankedProduct {
                age_min: bounds.age_min,
                age_max: bounds.age_max,
                relevance_score: play_board_relevance(&product.categories, needs),
                rationale: None,
                product: product.clone(),
            }
        })
        .filter(|p| AgeBounds::new(p.age_min, p.age_max).contains(age))
        .collect();

    // sort_by is stable: ties keep catalog order
    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked.truncate(limit);
    ranked
}

/// Play Board picks with the standard limit of six
pub fn score_and_filter_products(
    child_age: u32,
    needs: &[String],
    catalog: &[Product],
) -> Vec<RankedProduct> {
    rank_play_board(child_age, needs, catalog, PLAY_BOARD_LIMIT)
}

/// Tailored recommendations for a child with a known age band.
///
/// Children with neither a stored band nor a birthday get nothing.
pub fn rank_tailored(
    child: &ChildContext,
    needs: &[String],
    catalog: &[Product],
    today: NaiveDate,
    limit: usize,
) -> Vec<RankedProduct> {
    if child.effective_band(today).is_none() {
        return Vec::new();
    }

    let age_months = child.age_in_months(today);

    let mut ranked: Vec<RankedProduct> = catalog
        .iter()
        .filter_map(|product| {
            let bounds = AgeBounds::parse_or(product.age_range.as_deref(), AgeBounds::ALL_AGES);
            if !fits_age_months(product, bounds, age_months) {
                return None;
            }

            Some(RankedProduct {
                age_min: bounds.age_min,
                age_max: bounds.age_max,
                relevance_score: tailored_relevance(&product.categories, needs),
                rationale: Some(rationale_for(&product.categories, &child.name)),
                product: product.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked.truncate(limit);
    ranked
}

/// Tailored recommendations with the standard limit of twelve
pub fn recommend_for_child(
    child: &ChildContext,
    needs: &[String],
    catalog: &[Product],
    today: NaiveDate,
) -> Vec<RankedProduct> {
    rank_tailored(child, needs, catalog, today, TAILORED_LIMIT)
}

/// Entry point tying the tables to the ranking pipelines
///
/// # Pipelines
/// 1. Shop query parsing
/// 2. Onboarding answers -> needs -> insights
/// 3. Needs + catalog -> Play Board picks / tailored recommendations
/// 4. Shop facet filtering
#[derive(Debug, Clone)]
pub struct Recommender {
    tables: Arc<Tables>,
    limits: RecommendationLimits,
}

impl Recommender {
    pub fn new(tables: Arc<Tables>, limits: RecommendationLimits) -> Self {
        Self { tables, limits }
    }

    pub fn limits(&self) -> RecommendationLimits {
        self.limits
    }

    pub fn parse_query(&self, query: &str) -> ParsedQuery {
        QueryParser::new(&self.tables.lexicon).parse(query)
    }

    pub fn insights(&self, answers: &ChildAnswers) -> InsightResult {
        let tags = answers.condition_tags();
        InsightResult {
            insights: insights_from_rules(&self.tables.rules, &tags),
            needs: needs_from_rules(&self.tables.rules, &tags),
        }
    }

    pub fn play_board_products(
        &self,
        child_age: u32,
        answers: &ChildAnswers,
        catalog: &[Product],
    ) -> RecommendationResult {
        let needs = needs_from_rules(&self.tables.rules, &answers.condition_tags());
        let products = rank_play_board(child_age, &needs, catalog, self.limits.play_board);

        tracing::debug!(
            "Play Board: {} needs, {} of {} products kept",
            needs.len(),
            products.len(),
            catalog.len()
        );

        RecommendationResult {
            products,
            needs,
            total_candidates: catalog.len(),
        }
    }

    pub fn tailored_products(
        &self,
        child: &ChildContext,
        answers: &ChildAnswers,
        catalog: &[Product],
        today: NaiveDate,
    ) -> RecommendationResult {
        let needs = needs_from_rules(&self.tables.rules, &answers.condition_tags());
        let products = rank_tailored(child, &needs, catalog, today, self.limits.tailored);

        tracing::debug!(
            "Tailored picks for {}: {} needs, {} of {} products kept",
            child.name,
            needs.len(),
            products.len(),
            catalog.len()
        );

        RecommendationResult {
            products,
            needs,
            total_candidates: catalog.len(),
        }
    }

    /// Shop listing; a free-text query is parsed and applied as intent
    pub fn shop<'a>(
        &self,
        catalog: &'a [Product],
        mut filter: ShopFilter,
        query: Option<&str>,
    ) -> (Vec<&'a Product>, Option<ParsedQuery>) {
        let intent = query
            .filter(|q| !q.trim().is_empty())
            .map(|q| self.parse_query(q));

        filter.intent = intent.clone();
        (filter_catalog(catalog, &filter), intent)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(
            Arc::new(crate::core::lexicon::DEFAULT_TABLES.clone()),
            RecommendationLimits::default(),
        )
    }
}
