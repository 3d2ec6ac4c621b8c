use serde::Deserialize;

use super::{Difficulty, ResourceType};
use crate::error::AppError;

/// Optional, independently ANDed constraints for browsing the catalog.
///
/// A `None` (or empty `tags`) dimension imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub difficulty: Option<Difficulty>,
    /// Every tag listed here must be present on the resource
    pub tags: Vec<String>,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none()
            && self.resource_type.is_none()
            && self.difficulty.is_none()
            && self.tags.is_empty()
    }
}

/// Raw query string of the resource listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    #[serde(default, alias = "q")]
    pub search: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Comma separated
    #[serde(default, alias = "tag")]
    pub tags: Option<String>,
}

impl TryFrom<ResourceQuery> for FilterCriteria {
    type Error = AppError;

    fn try_from(query: ResourceQuery) -> Result<Self, Self::Error> {
        let resource_type = non_blank(query.resource_type)
            .map(|s| s.parse::<ResourceType>())
            .transpose()?;
        let difficulty = non_blank(query.difficulty)
            .map(|s| s.parse::<Difficulty>())
            .transpose()?;
        let tags = non_blank(query.tags)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(FilterCriteria {
            search: non_blank(query.search),
            resource_type,
            difficulty,
            tags,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
