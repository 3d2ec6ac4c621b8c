use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, Resource, ResourceType};
use crate::error::{AppError, AppResult};

/// Default size of a recommended learning path
pub const DEFAULT_MAX_ITEMS: usize = 5;
/// Largest learning path a request may ask for
pub const MAX_ITEMS_LIMIT: usize = 10;

const GOAL_MIN_LEN: usize = 5;

/// Request body for the recommend-path endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub goal: String,
    #[serde(default)]
    pub max_items: Option<usize>,
}

impl RecommendationRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();

        if self.goal.trim().chars().count() < GOAL_MIN_LEN {
            errors.push(format!(
                "\"goal\" length must be at least {} characters",
                GOAL_MIN_LEN
            ));
        }

        if let Some(max_items) = self.max_items {
            if !(1..=MAX_ITEMS_LIMIT).contains(&max_items) {
                errors.push(format!(
                    "\"maxItems\" must be between 1 and {}",
                    MAX_ITEMS_LIMIT
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(errors.join(", ")))
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items.unwrap_or(DEFAULT_MAX_ITEMS)
    }
}

/// The slice of a resource echoed back in a learning path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: Uuid,
    pub title: String,
    pub difficulty: Difficulty,
    pub resource_type: ResourceType,
    pub estimated_minutes: u32,
}

impl From<&Resource> for ResourceSummary {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title.clone(),
            difficulty: resource.difficulty,
            resource_type: resource.resource_type,
            estimated_minutes: resource.estimated_minutes,
        }
    }
}

/// A ranked learning path built from a free-text goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub summary: String,
    pub resources: Vec<ResourceSummary>,
    pub total_estimated_minutes: u64,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_max_items() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"goal": "learn rust async"}"#).unwrap();
        assert_eq!(request.max_items, None);
        assert_eq!(request.max_items(), DEFAULT_MAX_ITEMS);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_short_goal_and_out_of_range_max_items() {
        let request = RecommendationRequest {
            goal: "  go ".to_string(),
            max_items: Some(11),
        };

        let err = request.validate().unwrap_err().to_string();
        assert!(err.contains("\"goal\""));
        assert!(err.contains("\"maxItems\""));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = RecommendationResult {
            summary: "s".to_string(),
            resources: vec![],
            total_estimated_minutes: 0,
            explanation: "e".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalEstimatedMinutes"], 0);
        assert!(json["resources"].as_array().unwrap().is_empty());
    }
}
