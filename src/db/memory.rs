use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::{ResourceCatalog, ResourceStore},
    error::{AppError, AppResult},
    models::{Difficulty, NewResource, Resource, ResourceType, ResourceUpdate},
};

/// Volatile catalog kept in process memory
///
/// Reads return resources in insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    resources: RwLock<Vec<Resource>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding exactly `resources`, in that order
    pub fn with_resources(resources: Vec<Resource>) -> Self {
        Self {
            resources: RwLock::new(resources),
        }
    }

    /// Creates a store with the starter catalog
    pub fn seeded() -> Self {
        Self::with_resources(seed_resources())
    }
}

/// Starter catalog used when the in-memory backend boots empty
pub fn seed_resources() -> Vec<Resource> {
    vec![
        Resource::new(NewResource {
            title: "JavaScript Basics".to_string(),
            slug: "javascript-basics".to_string(),
            description: "Learn the fundamentals of JavaScript.".to_string(),
            resource_type: ResourceType::Article,
            difficulty: Difficulty::Beginner,
            tags: vec!["javascript".to_string(), "basics".to_string()],
            estimated_minutes: 30,
        }),
        Resource::new(NewResource {
            title: "Advanced React Patterns".to_string(),
            slug: "advanced-react-patterns".to_string(),
            description: "Deep dive into advanced React concepts.".to_string(),
            resource_type: ResourceType::Video,
            difficulty: Difficulty::Advanced,
            tags: vec!["react".to_string(), "patterns".to_string()],
            estimated_minutes: 90,
        }),
    ]
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("slug \"{}\" is already in use", slug))
}

#[async_trait::async_trait]
impl ResourceCatalog for InMemoryStore {
    async fn read_all(&self) -> AppResult<Vec<Resource>> {
        Ok(self.resources.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait::async_trait]
impl ResourceStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let resources = self.resources.read().await;
        Ok(resources.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, data: NewResource) -> AppResult<Resource> {
        let mut resources = self.resources.write().await;
        if resources.iter().any(|r| r.slug == data.slug) {
            return Err(slug_conflict(&data.slug));
        }

        let resource = Resource::new(data);
        resources.push(resource.clone());
        tracing::info!(id = %resource.id, slug = %resource.slug, "Resource created");
        Ok(resource)
    }

    /// All-or-nothing: a single duplicate slug rejects the whole batch
    async fn insert_many(&self, data: Vec<NewResource>) -> AppResult<Vec<Resource>> {
        let mut resources = self.resources.write().await;

        for (i, item) in data.iter().enumerate() {
            let taken = resources.iter().any(|r| r.slug == item.slug)
                || data[..i].iter().any(|earlier| earlier.slug == item.slug);
            if taken {
                return Err(slug_conflict(&item.slug));
            }
        }

        let created: Vec<Resource> = data.into_iter().map(Resource::new).collect();
        resources.extend(created.iter().cloned());
        tracing::info!(count = created.len(), "Resources created");
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: ResourceUpdate) -> AppResult<Option<Resource>> {
        let mut resources = self.resources.write().await;

        let Some(index) = resources.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(slug) = &changes.slug {
            if resources.iter().any(|r| r.id != id && &r.slug == slug) {
                return Err(slug_conflict(slug));
            }
        }

        let existing = &mut resources[index];
        changes.apply_to(existing);
        tracing::info!(id = %id, "Resource updated");
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut resources = self.resources.write().await;
        let before = resources.len();
        resources.retain(|r| r.id != id);
        let deleted = resources.len() < before;
        if deleted {
            tracing::info!(id = %id, "Resource deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_resource(slug: &str) -> NewResource {
        NewResource {
            title: format!("Title for {}", slug),
            slug: slug.to_string(),
            description: "A perfectly adequate description.".to_string(),
            resource_type: ResourceType::Course,
            difficulty: Difficulty::Intermediate,
            tags: vec!["rust".to_string()],
            estimated_minutes: 20,
        }
    }

    #[tokio::test]
    async fn test_seeded_store_reads_in_insertion_order() {
        let store = InMemoryStore::seeded();
        let all = store.read_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "JavaScript Basics");
        assert_eq!(all[1].title, "Advanced React Patterns");
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = InMemoryStore::new();
        let created = store.insert(new_resource("first")).await.unwrap();

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_taken_slug_is_not_found() {
        let store = InMemoryStore::new();
        store.insert(new_resource("taken")).await.unwrap();

        let changes = ResourceUpdate {
            slug: Some("taken".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(Uuid::new_v4(), changes).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let store = InMemoryStore::new();
        store.insert(new_resource("dup")).await.unwrap();

        let result = store.insert(new_resource("dup")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let store = InMemoryStore::new();
        let batch = vec![new_resource("a"), new_resource("b"), new_resource("a")];

        assert!(matches!(
            store.insert_many(batch).await,
            Err(AppError::Conflict(_))
        ));
        assert!(store.read_all().await.unwrap().is_empty());

        let created = store
            .insert_many(vec![new_resource("a"), new_resource("b")])
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(store.read_all().await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = InMemoryStore::seeded();
        let changes = ResourceUpdate {
            title: Some("Whatever".to_string()),
            ..Default::default()
        };

        assert_eq!(store.update(Uuid::new_v4(), changes).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_rejects_slug_of_other_resource() {
        let store = InMemoryStore::new();
        store.insert(new_resource("taken")).await.unwrap();
        let other = store.insert(new_resource("mine")).await.unwrap();

        let changes = ResourceUpdate {
            slug: Some("taken".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(other.id, changes).await,
            Err(AppError::Conflict(_))
        ));

        // Keeping its own slug is fine
        let changes = ResourceUpdate {
            slug: Some("mine".to_string()),
            estimated_minutes: Some(99),
            ..Default::default()
        };
        let updated = store.update(other.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.estimated_minutes, 99);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();
        let created = store.insert(new_resource("gone")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
