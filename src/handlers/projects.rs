use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::resource::Resource;
use crate::services::{ProjectInput, ProjectView};

/// GET /api/Project
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ProjectView>> {
    Ok(ApiResponse::success(state.services.projects.list().await?))
}

/// GET /api/Project/:id
pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<ProjectView> {
    Ok(ApiResponse::success(state.services.projects.get(id).await?))
}

/// POST /api/Project
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<ProjectView> {
    let project = state.services.projects.create(input).await?;
    let location = Resource::Project.item_path(project.id);
    Ok(ApiResponse::created(project, location))
}

/// PUT /api/Project/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<ProjectView> {
    Ok(ApiResponse::success(state.services.projects.update(id, input).await?))
}

/// DELETE /api/Project/:id
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<()> {
    state.services.projects.delete(id).await?;
    Ok(ApiResponse::no_content())
}
