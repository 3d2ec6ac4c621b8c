pub mod filter;
pub mod recommendation;
pub mod resource;

pub use filter::{FilterCriteria, ResourceQuery};
pub use recommendation::{
    RecommendationRequest, RecommendationResult, ResourceSummary, DEFAULT_MAX_ITEMS,
    MAX_ITEMS_LIMIT,
};
pub use resource::{Difficulty, NewResource, Resource, ResourceType, ResourceUpdate};
