use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Resource};
use crate::services::keywords::KeywordSet;

/// Points awarded per match. Defaults are 5 / 3 / 1 / 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// A tag equals the keyword
    pub tag_weight: u32,
    /// The title contains the keyword
    pub title_weight: u32,
    /// The description contains the keyword
    pub description_weight: u32,
    /// Flat bonus for Beginner resources when the goal asks for basics
    pub beginner_bonus: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tag_weight: 5,
            title_weight: 3,
            description_weight: 1,
            beginner_bonus: 2,
        }
    }
}

/// Scores resources against the keywords of one goal
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Sum over keywords of tag, title and description matches, each checked
    /// independently, plus the beginner bonus at most once.
    ///
    /// Keywords are expected lower-cased, as [`extract_keywords`] produces
    /// them.
    ///
    /// [`extract_keywords`]: crate::services::keywords::extract_keywords
    pub fn score(&self, resource: &Resource, keywords: &KeywordSet, beginner_intent: bool) -> u32 {
        let title = resource.title.to_lowercase();
        let description = resource.description.to_lowercase();
        let tags: Vec<String> = resource.tags.iter().map(|t| t.to_lowercase()).collect();

        let mut score: u32 = 0;

        for keyword in keywords.iter() {
            if tags.iter().any(|t| t == keyword) {
                score = score.saturating_add(self.weights.tag_weight);
            }
            if title.contains(keyword) {
                score = score.saturating_add(self.weights.title_weight);
            }
            if description.contains(keyword) {
                score = score.saturating_add(self.weights.description_weight);
            }
        }

        if beginner_intent && resource.difficulty == Difficulty::Beginner {
            score = score.saturating_add(self.weights.beginner_bonus);
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewResource, ResourceType};
    use crate::services::keywords::extract_keywords;

    fn resource(title: &str, description: &str, tags: &[&str], difficulty: Difficulty) -> Resource {
        Resource::new(NewResource {
            title: title.to_string(),
            slug: "test".to_string(),
            description: description.to_string(),
            resource_type: ResourceType::Article,
            difficulty,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            estimated_minutes: 10,
        })
    }

    fn keywords(terms: &[&str]) -> KeywordSet {
        KeywordSet::from(terms.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_tag_beats_title_beats_description() {
        let scorer = RelevanceScorer::default();
        let kw = keywords(&["graphql"]);

        let tag_only = resource("Schemas", "Type systems.", &["graphql"], Difficulty::Advanced);
        let title_only = resource("GraphQL Schemas", "Type systems.", &["api"], Difficulty::Advanced);
        let description_only =
            resource("Schemas", "Type systems in GraphQL.", &["api"], Difficulty::Advanced);

        let tag = scorer.score(&tag_only, &kw, false);
        let title = scorer.score(&title_only, &kw, false);
        let description = scorer.score(&description_only, &kw, false);

        assert_eq!((tag, title, description), (5, 3, 1));
        assert!(tag > title && title > description);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let scorer = RelevanceScorer::new(ScoringWeights {
            tag_weight: u32::MAX,
            title_weight: u32::MAX,
            description_weight: 1,
            beginner_bonus: u32::MAX,
        });
        let r = resource("Rust Book", "All about rust.", &["rust"], Difficulty::Beginner);

        assert_eq!(scorer.score(&r, &keywords(&["rust", "rust"]), true), u32::MAX);
    }

    #[test]
    fn test_single_keyword_can_score_all_three_fields() {
        let scorer = RelevanceScorer::default();
        let r = resource("Rust Book", "All about rust.", &["rust"], Difficulty::Intermediate);

        assert_eq!(scorer.score(&r, &keywords(&["rust"]), false), 9);
    }

    #[test]
    fn test_tag_match_is_case_insensitive_and_exact() {
        let scorer = RelevanceScorer::default();
        let tagged = resource("Hooks", "State in components.", &["React"], Difficulty::Intermediate);

        assert_eq!(scorer.score(&tagged, &keywords(&["react"]), false), 5);
        // "reactive" neither equals the tag nor appears in the text
        assert_eq!(scorer.score(&tagged, &keywords(&["reactive"]), false), 0);
        // A tag substring does not count as a tag match
        assert_eq!(scorer.score(&tagged, &keywords(&["rea"]), false), 0);
    }

    #[test]
    fn test_title_and_description_are_substring_matches() {
        let scorer = RelevanceScorer::default();
        let r = resource("JavaScript Basics", "Fundamentals of scripting.", &["js"], Difficulty::Beginner);

        // "script" is inside "javascript" (title) and "scripting" (description)
        assert_eq!(scorer.score(&r, &keywords(&["script"]), false), 4);
    }

    #[test]
    fn test_beginner_bonus_applies_once() {
        let scorer = RelevanceScorer::default();
        let beginner = resource("Intro", "Nothing relevant.", &["misc"], Difficulty::Beginner);
        let advanced = resource("Intro", "Nothing relevant.", &["misc"], Difficulty::Advanced);
        let kw = keywords(&["basics", "start", "first"]);

        assert_eq!(scorer.score(&beginner, &kw, true), 2);
        assert_eq!(scorer.score(&beginner, &kw, false), 0);
        assert_eq!(scorer.score(&advanced, &kw, true), 0);
    }

    #[test]
    fn test_repeated_keyword_counts_twice() {
        let scorer = RelevanceScorer::default();
        let r = resource("Tokio", "Async runtime.", &["tokio"], Difficulty::Advanced);

        assert_eq!(scorer.score(&r, &extract_keywords("tokio tokio"), false), 2 * (5 + 3));
    }

    #[test]
    fn test_empty_keywords_score_zero_without_beginner_intent() {
        let scorer = RelevanceScorer::default();
        let r = resource("Anything", "Anything at all.", &["any"], Difficulty::Beginner);

        assert_eq!(scorer.score(&r, &KeywordSet::default(), false), 0);
    }

    #[test]
    fn test_score_grows_with_more_matches() {
        let scorer = RelevanceScorer::default();
        let r = resource("Rust Async", "Futures and tokio.", &["rust", "async"], Difficulty::Advanced);

        let one = scorer.score(&r, &keywords(&["rust"]), false);
        let two = scorer.score(&r, &keywords(&["rust", "async"]), false);
        let three = scorer.score(&r, &keywords(&["rust", "async", "tokio"]), false);

        assert!(one <= two && two <= three);
        assert!(three > one);
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let scorer = RelevanceScorer::new(ScoringWeights {
            tag_weight: 10,
            title_weight: 0,
            description_weight: 0,
            beginner_bonus: 7,
        });
        let r = resource("Rust", "Rust.", &["rust"], Difficulty::Beginner);

        assert_eq!(scorer.score(&r, &keywords(&["rust", "basics"]), true), 17);
    }
}
