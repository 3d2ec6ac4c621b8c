use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        FilterCriteria, NewResource, RecommendationRequest, RecommendationResult, Resource,
        ResourceQuery, ResourceUpdate,
    },
    services::resources,
};

use super::AppState;

// Request/Response types

/// Body of `POST /resources`: one resource or a batch
#[derive(Debug)]
pub enum CreateResourceRequest {
    One(NewResource),
    Many(Vec<NewResource>),
}

impl TryFrom<Value> for CreateResourceRequest {
    type Error = AppError;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let parsed = if body.is_array() {
            serde_json::from_value(body).map(CreateResourceRequest::Many)
        } else {
            serde_json::from_value(body).map(CreateResourceRequest::One)
        };
        parsed.map_err(|e| AppError::InvalidInput(e.to_string()))
    }
}

/// Mirrors the request shape: an object for one, an array for a batch
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreatedResources {
    One(Resource),
    Many(Vec<Resource>),
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Browse the catalog with optional search, type, difficulty and tag filters
pub async fn list_resources(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ResourceQuery>,
) -> AppResult<Json<Vec<Resource>>> {
    let criteria = FilterCriteria::try_from(query)?;

    let matched = resources::list_resources(state.store.as_ref(), &criteria).await?;

    tracing::info!(
        request_id = %request_id,
        unconstrained = criteria.is_unconstrained(),
        matched = matched.len(),
        "Listed resources"
    );

    Ok(Json(matched))
}

pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Resource>> {
    let resource = resources::get_resource(state.store.as_ref(), id).await?;
    Ok(Json(resource))
}

/// Create one resource, or several when the body is an array
pub async fn create_resource(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<CreatedResources>)> {
    let created = match CreateResourceRequest::try_from(body)? {
        CreateResourceRequest::One(data) => {
            CreatedResources::One(resources::create_resource(state.store.as_ref(), data).await?)
        }
        CreateResourceRequest::Many(data) => {
            CreatedResources::Many(resources::create_resources(state.store.as_ref(), data).await?)
        }
    };

    let count = match &created {
        CreatedResources::One(_) => 1,
        CreatedResources::Many(items) => items.len(),
    };
    tracing::info!(request_id = %request_id, count, "Created resources");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_resource(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ResourceUpdate>,
) -> AppResult<Json<Resource>> {
    let updated = resources::update_resource(state.store.as_ref(), id, changes).await?;
    tracing::info!(request_id = %request_id, id = %id, "Updated resource");
    Ok(Json(updated))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    resources::delete_resource(state.store.as_ref(), id).await?;
    tracing::info!(request_id = %request_id, id = %id, "Deleted resource");
    Ok(StatusCode::NO_CONTENT)
}

/// Turn a free-text goal into a ranked learning path
pub async fn recommend_path(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResult>> {
    request.validate()?;

    tracing::info!(
        request_id = %request_id,
        max_items = request.max_items(),
        "Processing recommendation request"
    );

    let result = state
        .engine
        .recommend(state.store.as_ref(), &request.goal, request.max_items())
        .await?;

    tracing::info!(
        request_id = %request_id,
        recommended = result.resources.len(),
        total_minutes = result.total_estimated_minutes,
        "Recommendation completed"
    );

    Ok(Json(result))
}
