use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{ChildAnswers, ChildContext};

/// Request to parse a free-text shop query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParseQueryRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: String,
}

/// Onboarding answers for the insights endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InsightsRequest {
    #[validate(length(max = 50))]
    #[serde(default)]
    pub schemas: Vec<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub barriers: Vec<String>,
}

impl InsightsRequest {
    pub fn answers(&self) -> ChildAnswers {
        ChildAnswers {
            schemas: self.schemas.clone(),
            barriers: self.barriers.clone(),
            interests: Vec::new(),
        }
    }
}

/// Request for the Play Board picks
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayBoardProductsRequest {
    #[validate(range(max = 18))]
    #[serde(alias = "child_age", rename = "childAge")]
    pub child_age: u32,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub schemas: Vec<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub barriers: Vec<String>,
}

impl PlayBoardProductsRequest {
    pub fn answers(&self) -> ChildAnswers {
        ChildAnswers {
            schemas: self.schemas.clone(),
            barriers: self.barriers.clone(),
            interests: Vec::new(),
        }
    }
}

/// Request for the tailored recommendations page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(custom(function = "validate_child"))]
    pub child: ChildContext,
    #[serde(default)]
    pub answers: ChildAnswers,
}

fn validate_child(child: &ChildContext) -> Result<(), validator::ValidationError> {
    if child.name.trim().is_empty() {
        return Err(validator::ValidationError::new("child_name_required"));
    }
    Ok(())
}

/// Shop listing request; every facet is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShopSearchRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub search: String,
    #[validate(custom(function = "validate_category"))]
    #[serde(default)]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: Option<String>,
    #[validate(range(max = 18))]
    #[serde(alias = "child_age", rename = "childAge", default)]
    pub child_age: Option<u32>,
}

fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    if crate::core::filters::is_shop_category(category) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unknown_category"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_play_board_request_accepts_camel_case() {
        let request: PlayBoardProductsRequest = serde_json::from_value(json!({
            "childAge": 4,
            "schemas": ["building"]
        }))
        .unwrap();

        assert_eq!(request.child_age, 4);
        assert!(request.barriers.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_shop_request_rejects_unknown_category() {
        let request = ShopSearchRequest {
            category: Some("weapons".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = ShopSearchRequest {
            category: Some("books".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_recommendations_request_requires_name() {
        let request: RecommendationsRequest = serde_json::from_value(json!({
            "child": { "name": "  ", "ageBand": "2-5y" }
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }
}
