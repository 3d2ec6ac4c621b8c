use std::sync::Arc;

use uuid::Uuid;

use crate::{
    cached,
    db::{Cache, CacheKey, ResourceCatalog, ResourceStore},
    error::AppResult,
    models::{NewResource, Resource, ResourceUpdate},
};

/// Redis read-through decorator over any [`ResourceStore`]
///
/// Snapshot reads and lookups by id are served from Redis when present.
/// Every successful write drops the catalog snapshot (and the touched
/// resource) so the next read goes back to the inner store. A snapshot
/// written in the background by a read that raced a write can survive for at
/// most `ttl` seconds. A failed Redis lookup falls back to the inner store.
pub struct CachedStore {
    inner: Arc<dyn ResourceStore>,
    cache: Cache,
    ttl: u64,
}

impl CachedStore {
    pub fn new(inner: Arc<dyn ResourceStore>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }

    /// A failed invalidation is logged, not returned: the write already
    /// happened and the stale entry expires on its own.
    async fn invalidate(&self, keys: &[CacheKey]) {
        if let Err(e) = self.cache.invalidate(keys).await {
            tracing::error!(error = %e, "Failed to invalidate catalog cache");
        }
    }
}

#[async_trait::async_trait]
impl ResourceCatalog for CachedStore {
    async fn read_all(&self) -> AppResult<Vec<Resource>> {
        cached!(self.cache, CacheKey::Catalog, self.ttl, self.inner.read_all())
    }

    fn name(&self) -> &'static str {
        "redis-cached"
    }
}

#[async_trait::async_trait]
impl ResourceStore for CachedStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let key = CacheKey::Resource(id);
        match self.cache.get_from_cache::<Resource>(&key).await {
            Ok(Some(hit)) => return Ok(Some(hit)),
            Ok(None) => {}
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache lookup failed"),
        }

        // Misses are not cached, so a later insert is never shadowed
        let found = self.inner.find_by_id(id).await?;
        if let Some(resource) = &found {
            self.cache.set_in_background(&key, resource, self.ttl);
        }
        Ok(found)
    }

    async fn insert(&self, data: NewResource) -> AppResult<Resource> {
        let created = self.inner.insert(data).await?;
        self.invalidate(&[CacheKey::Catalog]).await;
        Ok(created)
    }

    async fn insert_many(&self, data: Vec<NewResource>) -> AppResult<Vec<Resource>> {
        let created = self.inner.insert_many(data).await?;
        self.invalidate(&[CacheKey::Catalog]).await;
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: ResourceUpdate) -> AppResult<Option<Resource>> {
        let updated = self.inner.update(id, changes).await?;
        if updated.is_some() {
            self.invalidate(&[CacheKey::Catalog, CacheKey::Resource(id)])
                .await;
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.inner.delete(id).await?;
        if deleted {
            self.invalidate(&[CacheKey::Catalog, CacheKey::Resource(id)])
                .await;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_redis_client, InMemoryStore};

    /// Redis client pointed at a port nothing listens on
    async fn unreachable_cache() -> Cache {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client).await;
        cache
    }

    #[tokio::test]
    async fn test_reads_fall_through_when_redis_is_down() {
        let inner: Arc<dyn ResourceStore> = Arc::new(InMemoryStore::seeded());
        let expected = inner.read_all().await.unwrap();
        let store = CachedStore::new(inner, unreachable_cache().await, 60);

        let all = store.read_all().await.unwrap();
        assert_eq!(all, expected);

        let found = store.find_by_id(expected[0].id).await.unwrap();
        assert_eq!(found, Some(expected[0].clone()));
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_writes_succeed_when_invalidation_fails() {
        let inner: Arc<dyn ResourceStore> = Arc::new(InMemoryStore::new());
        let store = CachedStore::new(inner, unreachable_cache().await, 60);

        let created = store
            .insert(NewResource {
                title: "Offline Cache".to_string(),
                slug: "offline-cache".to_string(),
                description: "Written while Redis is unavailable.".to_string(),
                resource_type: crate::models::ResourceType::Article,
                difficulty: crate::models::Difficulty::Beginner,
                tags: vec!["cache".to_string()],
                estimated_minutes: 5,
            })
            .await
            .unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
