use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    db::{ResourceCatalog, ResourceStore},
    error::{AppError, AppResult},
    models::{NewResource, Resource, ResourceUpdate},
};

/// Creates a PostgreSQL connection pool and brings the schema up to date
///
/// Establishes a pool of database connections for efficient reuse, then runs
/// the embedded migrations under `migrations/`.
pub async fn create_pool(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Row shape of the `learning_resources` table
#[derive(Debug, sqlx::FromRow)]
struct ResourceRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    resource_type: String,
    difficulty: String,
    tags: Vec<String>,
    estimated_minutes: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ResourceRow> for Resource {
    type Error = AppError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        let resource_type = row.resource_type.parse().map_err(|_| {
            AppError::Internal(format!(
                "Unknown resource type in database: {}",
                row.resource_type
            ))
        })?;
        let difficulty = row.difficulty.parse().map_err(|_| {
            AppError::Internal(format!("Unknown difficulty in database: {}", row.difficulty))
        })?;
        let estimated_minutes = u32::try_from(row.estimated_minutes).map_err(|_| {
            AppError::Internal(format!(
                "Negative duration in database for resource {}",
                row.id
            ))
        })?;

        Ok(Resource {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            resource_type,
            difficulty,
            tags: row.tags,
            estimated_minutes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn minutes_column(minutes: u32) -> AppResult<i32> {
    i32::try_from(minutes)
        .map_err(|_| AppError::InvalidInput("\"estimatedMinutes\" is too large".to_string()))
}

/// Maps the slug unique constraint to `Conflict`, everything else to `Database`
fn map_write_error(error: sqlx::Error, slug: &str) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("slug \"{}\" is already in use", slug))
        }
        _ => AppError::Database(error),
    }
}

const INSERT_SQL: &str = r#"
    INSERT INTO learning_resources
        (id, title, slug, description, resource_type, difficulty, tags, estimated_minutes)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING *
"#;

/// `seq` is an identity column, so rows from one transaction keep their
/// insertion order even though they share `created_at`
const READ_ALL_SQL: &str = "SELECT * FROM learning_resources ORDER BY seq ASC";

/// Persistent catalog backed by PostgreSQL
///
/// Reads are in insertion order so ranking ties are reproducible across
/// requests.
#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_with<'e, E>(executor: E, data: NewResource) -> AppResult<Resource>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let minutes = minutes_column(data.estimated_minutes)?;
        let row = sqlx::query_as::<_, ResourceRow>(INSERT_SQL)
            .bind(Uuid::new_v4())
            .bind(&data.title)
            .bind(&data.slug)
            .bind(&data.description)
            .bind(data.resource_type.as_str())
            .bind(data.difficulty.as_str())
            .bind(&data.tags)
            .bind(minutes)
            .fetch_one(executor)
            .await
            .map_err(|e| map_write_error(e, &data.slug))?;

        row.try_into()
    }
}

#[async_trait::async_trait]
impl ResourceCatalog for PgResourceStore {
    async fn read_all(&self) -> AppResult<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceRow>(READ_ALL_SQL)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Resource::try_from).collect()
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[async_trait::async_trait]
impl ResourceStore for PgResourceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let row = sqlx::query_as::<_, ResourceRow>(
            "SELECT * FROM learning_resources WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Resource::try_from).transpose()
    }

    async fn insert(&self, data: NewResource) -> AppResult<Resource> {
        let resource = Self::insert_with(&self.pool, data).await?;
        tracing::info!(id = %resource.id, slug = %resource.slug, "Resource created");
        Ok(resource)
    }

    /// Inserts the whole batch in one transaction
    async fn insert_many(&self, data: Vec<NewResource>) -> AppResult<Vec<Resource>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(data.len());

        for item in data {
            created.push(Self::insert_with(&mut *tx, item).await?);
        }

        tx.commit().await?;
        tracing::info!(count = created.len(), "Resources created");
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: ResourceUpdate) -> AppResult<Option<Resource>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ResourceRow>(
            "SELECT * FROM learning_resources WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut resource = Resource::try_from(existing)?;
        changes.apply_to(&mut resource);
        let minutes = minutes_column(resource.estimated_minutes)?;

        let row = sqlx::query_as::<_, ResourceRow>(
            r#"
            UPDATE learning_resources
            SET title = $2, slug = $3, description = $4, resource_type = $5,
                difficulty = $6, tags = $7, estimated_minutes = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&resource.title)
        .bind(&resource.slug)
        .bind(&resource.description)
        .bind(resource.resource_type.as_str())
        .bind(resource.difficulty.as_str())
        .bind(&resource.tags)
        .bind(minutes)
        .bind(resource.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &resource.slug))?;

        tx.commit().await?;
        tracing::info!(id = %id, "Resource updated");
        Ok(Some(row.try_into()?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM learning_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id = %id, "Resource deleted");
        }
        Ok(deleted)
    }
}
