use crate::core::age::AgeBounds;
use crate::models::{ParsedQuery, Product};

/// Shop category facets as `(value, label)`; `"all"` disables the facet
pub const SHOP_CATEGORIES: [(&str, &str); 6] = [
    ("all", "All Products"),
    ("building", "Building & Construction"),
    ("dolls", "Dolls & Pretend Play"),
    ("art", "Art & Creativity"),
    ("books", "Books & Stories"),
    ("motor", "Movement & Motor Skills"),
];

pub fn is_shop_category(value: &str) -> bool {
    SHOP_CATEGORIES.iter().any(|(v, _)| *v == value)
}

/// Shop filter state
#[derive(Debug, Clone, Default)]
pub struct ShopFilter {
    pub search: String,
    pub category: Option<String>,
    pub intent: Option<ParsedQuery>,
    pub child_age: Option<u32>,
}

/// Check if a product's age span admits a child of `age_years`
#[inline]
pub fn fits_age(product: &Product, age_years: f64, default: AgeBounds) -> bool {
    AgeBounds::parse_or(product.age_range.as_deref(), default).contains(age_years)
}

/// Age check for tailored picks: exact month bounds when the catalog has
/// them, otherwise the parsed year span.
#[inline]
pub fn fits_age_months(product: &Product, bounds: AgeBounds, age_months: u32) -> bool {
    match (product.min_age_months, product.max_age_months) {
        (Some(min), Some(max)) => age_months >= min && age_months <= max,
        _ => bounds.contains(age_months as f64 / 12.0),
    }
}

/// Name search, case-insensitive
#[inline]
pub fn matches_search(product: &Product, search: &str) -> bool {
    product.name.to_lowercase().contains(&search.to_lowercase())
}

/// Category facet: any product category containing the facet value
#[inline]
pub fn matches_category(product: &Product, category: &str) -> bool {
    category == "all"
        || product
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(category))
}

/// Parsed query applied as filter state. Unrecognized queries match everything.
pub fn matches_intent(product: &Product, intent: &ParsedQuery) -> bool {
    if !intent.has_results {
        return true;
    }

    if let Some(age_range) = &intent.age_range {
        if product.age_range.as_deref() != Some(age_range.as_str()) {
            return false;
        }
    }

    if !intent.categories.is_empty() {
        let wanted: Vec<String> = intent.categories.iter().map(|c| c.to_lowercase()).collect();
        let hit = product.categories.iter().any(|c| {
            let c = c.to_lowercase();
            wanted.iter().any(|w| c.contains(w.as_str()))
        });
        if !hit {
            return false;
        }
    }

    true
}

/// Check a product against every active shop facet
pub fn matches_shop_filter(product: &Product, filter: &ShopFilter) -> bool {
    if !matches_search(product, &filter.search) {
        return false;
    }

    if let Some(category) = &filter.category {
        if !matches_category(product, category) {
            return false;
        }
    }

    if let Some(intent) = &filter.intent {
        if !matches_intent(product, intent) {
            return false;
        }
    }

    if let Some(age) = filter.child_age {
        if !fits_age(product, age as f64, AgeBounds::SHOP_DEFAULT) {
            return false;
        }
    }

    true
}

/// Products passing the shop filter, in catalog order
pub fn filter_catalog<'a>(catalog: &'a [Product], filter: &ShopFilter) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| matches_shop_filter(p, filter))
        .collect()
}
