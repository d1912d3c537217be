// handlers/catalog.rs - /api/ProjectType, /api/Team and /api/Role
//
// The three catalog resources share one set of handlers, instantiated per
// entity type when the router is built.

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::{ProjectType, Role, Team};
use crate::database::{Entity, Repository, Store};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::resource::Resource;
use crate::services::{CatalogEntity, CatalogService, NameInput, Services};

/// Binds a catalog entity to its URL and its service.
pub trait CatalogResource: CatalogEntity {
    const RESOURCE: Resource;

    fn service(services: &Services) -> &CatalogService<Self>;
}

impl CatalogResource for ProjectType {
    const RESOURCE: Resource = Resource::ProjectType;

    fn service(services: &Services) -> &CatalogService<Self> {
        &services.project_types
    }
}

impl CatalogResource for Team {
    const RESOURCE: Resource = Resource::Team;

    fn service(services: &Services) -> &CatalogService<Self> {
        &services.teams
    }
}

impl CatalogResource for Role {
    const RESOURCE: Resource = Resource::Role;

    fn service(services: &Services) -> &CatalogService<Self> {
        &services.roles
    }
}

/// GET /api/{Resource}
pub async fn list<E>(State(state): State<AppState>) -> ApiResult<Vec<E>>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    let rows = E::service(&state.services).list().await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/{Resource}/:id
pub async fn show<E>(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<E>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    let row = E::service(&state.services).get(id).await?;
    Ok(ApiResponse::success(row))
}

/// POST /api/{Resource}
pub async fn create<E>(State(state): State<AppState>, ApiJson(input): ApiJson<NameInput>) -> ApiResult<E>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    let row = E::service(&state.services).create(input).await?;
    let location = E::RESOURCE.item_path(row.id());
    Ok(ApiResponse::created(row, location))
}

/// PUT /api/{Resource}/:id, or /api/ProjectType/updateprojecttype/:id
pub async fn update<E>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<NameInput>,
) -> ApiResult<E>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    let row = E::service(&state.services).update(id, input).await?;
    Ok(ApiResponse::success(row))
}

/// DELETE /api/{Resource}/:id
pub async fn delete<E>(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<()>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    E::service(&state.services).delete(id).await?;
    Ok(ApiResponse::no_content())
}
