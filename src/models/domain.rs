use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::age::{age_from_birthday, AgeBand};

/// Catalog product as served by `GET /api/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub categories: Vec<String>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<String>,
    #[serde(rename = "minAgeMonths", default)]
    pub min_age_months: Option<u32>,
    #[serde(rename = "maxAgeMonths", default)]
    pub max_age_months: Option<u32>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "affiliateUrl", default)]
    pub affiliate_url: Option<String>,
    #[serde(rename = "tpvTier", default)]
    pub tpv_tier: Option<String>,
}

impl Product {
    /// Minimal product, mostly useful for tests and fixtures
    pub fn new(id: &str, name: &str, categories: &[&str], age_range: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            brand: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            age_range: age_range.map(str::to_string),
            min_age_months: None,
            max_age_months: None,
            image_url: None,
            affiliate_url: None,
            tpv_tier: None,
        }
    }
}

/// Product after age parsing and relevance scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "ageMin")]
    pub age_min: f64,
    #[serde(rename = "ageMax")]
    pub age_max: f64,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Filter intent extracted from a free-text shop query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub age_range: Option<String>,
    pub categories: Vec<String>,
    pub play_types: Vec<String>,
    pub has_results: bool,
}

/// One row of the condition -> need rules table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub condition: String,
    pub need: String,
}

/// Onboarding answers relevant to insights and recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildAnswers {
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(default)]
    pub barriers: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl ChildAnswers {
    /// Schemas followed by barriers, the input of the rules engine
    pub fn condition_tags(&self) -> Vec<String> {
        self.schemas
            .iter()
            .chain(self.barriers.iter())
            .cloned()
            .collect()
    }
}

/// The child a tailored recommendation is computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildContext {
    pub name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "ageMonths", default)]
    pub age_months: Option<u32>,
    #[serde(rename = "ageBand", default)]
    pub age_band: Option<AgeBand>,
}

impl ChildContext {
    /// Stored band, or the band derived from the birthday
    pub fn effective_band(&self, today: NaiveDate) -> Option<AgeBand> {
        self.age_band.or_else(|| {
            self.birthday
                .map(|b| AgeBand::from_months(age_from_birthday(b, today).total_months))
        })
    }

    /// Age in whole months: birthday first, then the stored count, else 0
    pub fn age_in_months(&self, today: NaiveDate) -> u32 {
        match self.birthday {
            Some(b) => age_from_birthday(b, today).total_months,
            None => self.age_months.unwrap_or(0),
        }
    }
}

/// Accept categories as a JSON array, a PostgreSQL array literal
/// (`{"a","b"}`), a comma separated string or null.
fn deserialize_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(normalize_categories).unwrap_or_default())
}

pub fn normalize_categories(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(raw) => {
            let inner = match raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                Some(inner) => inner,
                None => raw.as_str(),
            };
            inner
                .split(',')
                .map(|c| {
                    let c = c.trim();
                    c.strip_prefix('"')
                        .and_then(|c| c.strip_suffix('"'))
                        .unwrap_or(c)
                        .trim()
                        .to_string()
                })
                .filter(|c| !c.is_empty())
                .collect()
        }
        _ => Vec::new(),
    }
}
