use crate::{
    db::ResourceCatalog,
    error::AppResult,
    models::{RecommendationResult, Resource, ResourceSummary, MAX_ITEMS_LIMIT},
    services::{
        keywords::{extract_keywords, KeywordSet},
        ranking::{select_top, ScoredResource},
        scoring::{RelevanceScorer, ScoringWeights},
    },
};

/// Builds goal-driven learning paths from the catalog
///
/// Holds nothing but the scoring weights; every call works on its own
/// catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    scorer: RelevanceScorer,
}

impl RecommendationEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scorer: RelevanceScorer::new(weights),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scorer.weights()
    }

    /// Reads the catalog once and recommends up to `max_items` resources.
    ///
    /// `max_items` is clamped into `1..=10`. Catalog failures propagate
    /// unchanged; an unusable goal is an empty result, not an error.
    #[tracing::instrument(skip_all, fields(catalog = catalog.name(), max_items = max_items))]
    pub async fn recommend<C>(
        &self,
        catalog: &C,
        goal: &str,
        max_items: usize,
    ) -> AppResult<RecommendationResult>
    where
        C: ResourceCatalog + ?Sized,
    {
        let resources = catalog.read_all().await?;
        Ok(self.recommend_from(&resources, goal, max_items))
    }

    /// Same as [`recommend`](Self::recommend) over an already-read snapshot
    pub fn recommend_from(
        &self,
        resources: &[Resource],
        goal: &str,
        max_items: usize,
    ) -> RecommendationResult {
        let limit = max_items.clamp(1, MAX_ITEMS_LIMIT);
        let keywords = extract_keywords(goal);
        let beginner_intent = keywords.has_beginner_intent();

        let scored = resources
            .iter()
            .map(|resource| ScoredResource {
                resource,
                score: self.scorer.score(resource, &keywords, beginner_intent),
            })
            .collect();
        let selected = select_top(scored, limit);

        tracing::debug!(
            keywords = keywords.len(),
            beginner_intent,
            candidates = resources.len(),
            selected = selected.len(),
            top_score = selected.first().map(|s| s.score),
            "Scored catalog"
        );

        let resources: Vec<ResourceSummary> = selected
            .iter()
            .map(|s| ResourceSummary::from(s.resource))
            .collect();
        let total_estimated_minutes = resources
            .iter()
            .map(|r| u64::from(r.estimated_minutes))
            .sum();
        let explanation = explain(&keywords, resources.len(), beginner_intent);

        RecommendationResult {
            summary: format!("Here is a suggested learning path for {}.", goal),
            resources,
            total_estimated_minutes,
            explanation,
        }
    }
}

fn explain(keywords: &KeywordSet, selected: usize, beginner_intent: bool) -> String {
    if selected == 0 {
        return if keywords.is_empty() {
            "No matching resources found: the goal contained no usable keywords.".to_string()
        } else {
            format!(
                "No matching resources found for keywords ({}).",
                keywords.joined()
            )
        };
    }

    let noun = if selected == 1 { "resource" } else { "resources" };
    let mut explanation = format!(
        "Selected {} {} based on keyword relevance ({}).",
        selected,
        noun,
        keywords.joined()
    );
    if beginner_intent {
        explanation.push_str(" Prioritized beginner content.");
    }
    explanation
}
