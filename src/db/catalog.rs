//! Storage abstraction for the learning resource catalog
//!
//! The recommendation and filter paths only ever need a full read of the
//! catalog, so that is all `ResourceCatalog` exposes. `ResourceStore` layers
//! the CRUD operations used by the management endpoints on top. Backends
//! (in-memory, PostgreSQL, Redis-cached) are interchangeable behind
//! `Arc<dyn ResourceStore>`.

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewResource, Resource, ResourceUpdate},
};

/// Read contract required by the recommendation engine and the catalog filter
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Returns every resource currently in the catalog.
    ///
    /// The order is the backend's natural read order and must be stable for
    /// identical data, since ranking ties fall back to it.
    async fn read_all(&self) -> AppResult<Vec<Resource>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Full CRUD storage for resources
#[async_trait::async_trait]
pub trait ResourceStore: ResourceCatalog {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>>;

    /// Stores a new resource. Fails with `Conflict` when the slug is taken.
    async fn insert(&self, data: NewResource) -> AppResult<Resource>;

    /// Stores several resources.
    ///
    /// Default implementation inserts one at a time. Backends that can do it
    /// atomically should override.
    async fn insert_many(&self, data: Vec<NewResource>) -> AppResult<Vec<Resource>> {
        let mut created = Vec::with_capacity(data.len());
        for item in data {
            created.push(self.insert(item).await?);
        }
        Ok(created)
    }

    /// Applies a partial update. Returns `None` when the id is unknown.
    async fn update(&self, id: Uuid, changes: ResourceUpdate) -> AppResult<Option<Resource>>;

    /// Returns `false` when the id is unknown
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
