use uuid::Uuid;

use crate::{
    db::{ResourceCatalog, ResourceStore},
    error::{AppError, AppResult},
    models::{FilterCriteria, NewResource, Resource, ResourceUpdate},
    services::catalog_filter::filter_resources,
};

/// Reads the whole catalog once and narrows it with `criteria`
pub async fn list_resources<C>(catalog: &C, criteria: &FilterCriteria) -> AppResult<Vec<Resource>>
where
    C: ResourceCatalog + ?Sized,
{
    let all = catalog.read_all().await?;
    let total = all.len();
    let matched = filter_resources(all, criteria);

    tracing::debug!(total, matched = matched.len(), "Filtered catalog");
    Ok(matched)
}

pub async fn get_resource(store: &dyn ResourceStore, id: Uuid) -> AppResult<Resource> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::resource_not_found)
}

pub async fn create_resource(store: &dyn ResourceStore, data: NewResource) -> AppResult<Resource> {
    data.validate()?;
    store.insert(data).await
}

/// Validates the whole batch before storing any of it.
/// Error messages are prefixed with the offending item's index.
pub async fn create_resources(
    store: &dyn ResourceStore,
    data: Vec<NewResource>,
) -> AppResult<Vec<Resource>> {
    if data.is_empty() {
        return Err(AppError::InvalidInput(
            "bulk create requires at least 1 resource".to_string(),
        ));
    }

    let errors: Vec<String> = data
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item.validate() {
            Err(AppError::InvalidInput(msg)) => Some(format!("[{}] {}", i, msg)),
            _ => None,
        })
        .collect();
    if !errors.is_empty() {
        return Err(AppError::InvalidInput(errors.join(", ")));
    }

    store.insert_many(data).await
}

pub async fn update_resource(
    store: &dyn ResourceStore,
    id: Uuid,
    changes: ResourceUpdate,
) -> AppResult<Resource> {
    changes.validate()?;
    store
        .update(id, changes)
        .await?
        .ok_or_else(AppError::resource_not_found)
}

pub async fn delete_resource(store: &dyn ResourceStore, id: Uuid) -> AppResult<()> {
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(AppError::resource_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::{Difficulty, ResourceType};

    fn new_resource(slug: &str) -> NewResource {
        NewResource {
            title: "Docker Compose".to_string(),
            slug: slug.to_string(),
            description: "Multi-container local setups.".to_string(),
            resource_type: ResourceType::Tutorial,
            difficulty: Difficulty::Intermediate,
            tags: vec!["docker".to_string(), "devops".to_string()],
            estimated_minutes: 40,
        }
    }

    #[tokio::test]
    async fn test_list_with_criteria() {
        let store = InMemoryStore::seeded();
        let criteria = FilterCriteria::default().with_tags(["REACT"]);

        let result = list_resources(&store, &criteria).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Advanced React Patterns");
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = InMemoryStore::seeded();
        assert!(matches!(
            get_resource(&store, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_validates_before_storing() {
        let store = InMemoryStore::new();
        let mut invalid = new_resource("docker-compose");
        invalid.tags.clear();

        assert!(matches!(
            create_resource(&store, invalid).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_create_reports_item_index() {
        let store = InMemoryStore::new();
        let mut bad = new_resource("second");
        bad.estimated_minutes = 0;

        let err = create_resources(&store, vec![new_resource("first"), bad])
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("[1]"));
        assert!(err.contains("estimatedMinutes"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_create_rejects_empty_batch() {
        let store = InMemoryStore::new();
        assert!(matches!(
            create_resources(&store, Vec::new()).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_are_not_found() {
        let store = InMemoryStore::new();
        let changes = ResourceUpdate {
            title: Some("New title".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            update_resource(&store, Uuid::new_v4(), changes).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_resource(&store, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let store = InMemoryStore::new();
        let created = create_resource(&store, new_resource("compose")).await.unwrap();

        let changes = ResourceUpdate {
            difficulty: Some(Difficulty::Beginner),
            ..Default::default()
        };
        let updated = update_resource(&store, created.id, changes).await.unwrap();

        assert_eq!(updated.difficulty, Difficulty::Beginner);
        assert_eq!(get_resource(&store, created.id).await.unwrap(), updated);
    }
}
