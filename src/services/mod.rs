pub mod catalog_filter;
pub mod keywords;
pub mod ranking;
pub mod recommendations;
pub mod resources;
pub mod scoring;

pub use recommendations::RecommendationEngine;
pub use scoring::{RelevanceScorer, ScoringWeights};
