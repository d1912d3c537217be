pub mod catalog_service;
pub mod developer_service;
pub mod error;
pub mod project_service;

use std::collections::HashMap;
use std::sync::Arc;

use crate::database::{Entity, Repository, Store};

pub use catalog_service::{
    CatalogEntity, CatalogService, NameInput, ProjectTypeService, RoleService, TeamService,
};
pub use developer_service::{DeveloperInput, DeveloperService, DeveloperView};
pub use error::ServiceError;
pub use project_service::{ProjectInput, ProjectService, ProjectView};

/// One service per resource, all sharing the same store.
#[derive(Clone)]
pub struct Services {
    pub project_types: ProjectTypeService,
    pub teams: TeamService,
    pub roles: RoleService,
    pub developers: DeveloperService,
    pub projects: ProjectService,
}

impl Services {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            project_types: CatalogService::new(store.clone()),
            teams: CatalogService::new(store.clone()),
            roles: CatalogService::new(store.clone()),
            developers: DeveloperService::new(store.clone()),
            projects: ProjectService::new(store),
        }
    }
}

/// Trimmed value of a required text field.
pub(crate) fn required_text(
    value: Option<String>,
    field: &'static str,
    label: &str,
) -> Result<String, ServiceError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ServiceError::validation(format!("{} is required.", label), field)),
    }
}

/// Parent row for a foreign-key value. Non-positive ids never match.
pub(crate) async fn find_parent<P>(store: &dyn Store, id: i32) -> Result<Option<P>, ServiceError>
where
    P: Entity,
    dyn Store: Repository<P>,
{
    if id <= 0 {
        return Ok(None);
    }
    Ok(Repository::<P>::find_by_id(store, id).await?)
}

/// Display names of every row of a catalog table, keyed by id.
pub(crate) async fn name_index<P>(store: &dyn Store) -> Result<HashMap<i32, String>, ServiceError>
where
    P: CatalogEntity,
    dyn Store: Repository<P>,
{
    let rows = Repository::<P>::list(store).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.id(), row.name().to_string()))
        .collect())
}
