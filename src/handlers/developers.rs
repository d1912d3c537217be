use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::resource::Resource;
use crate::services::{DeveloperInput, DeveloperView};

/// GET /api/Developer
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<DeveloperView>> {
    Ok(ApiResponse::success(state.services.developers.list().await?))
}

/// GET /api/Developer/:id
pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<DeveloperView> {
    Ok(ApiResponse::success(state.services.developers.get(id).await?))
}

/// POST /api/Developer
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DeveloperInput>,
) -> ApiResult<DeveloperView> {
    let developer = state.services.developers.create(input).await?;
    let location = Resource::Developer.item_path(developer.id);
    Ok(ApiResponse::created(developer, location))
}

/// PUT /api/Developer/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<DeveloperInput>,
) -> ApiResult<DeveloperView> {
    Ok(ApiResponse::success(state.services.developers.update(id, input).await?))
}

/// DELETE /api/Developer/:id
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<()> {
    state.services.developers.delete(id).await?;
    Ok(ApiResponse::no_content())
}
