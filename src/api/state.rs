use std::sync::Arc;

use crate::db::{InMemoryStore, ResourceStore};
use crate::middleware::RateLimits;
use crate::services::RecommendationEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog backend selected at startup
    pub store: Arc<dyn ResourceStore>,
    pub engine: Arc<RecommendationEngine>,
    pub rate_limits: RateLimits,
}

impl AppState {
    /// State over `store` with default scoring weights and no rate limiting
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            engine: Arc::new(RecommendationEngine::default()),
            rate_limits: RateLimits::disabled(),
        }
    }

    /// State over the seeded in-memory catalog
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::seeded()))
    }

    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    pub fn with_rate_limits(mut self, rate_limits: RateLimits) -> Self {
        self.rate_limits = rate_limits;
        self
    }
}
