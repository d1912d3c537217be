use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::models::{Developer, DeveloperFields, Role, Team};
use crate::database::{DatabaseError, Repository, Store};

use super::{find_parent, name_index, required_text, ServiceError};

const INVALID_REFERENCES: &str = "Invalid TeamId or RoleId.";
const TITLE: &str = "Developer";

/// A developer as returned to clients, carrying its role and team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperView {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub team_id: i32,
    pub team_name: Option<String>,
}

impl DeveloperView {
    fn new(developer: Developer, role_name: Option<String>, team_name: Option<String>) -> Self {
        Self {
            id: developer.id,
            firstname: developer.firstname,
            lastname: developer.lastname,
            role_id: developer.role_id,
            role_name,
            team_id: developer.team_id,
            team_name,
        }
    }
}

/// Request body for creating or replacing a developer. Missing ids count as 0.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInput {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role_id: Option<i32>,
    pub team_id: Option<i32>,
}

#[derive(Clone)]
pub struct DeveloperService {
    store: Arc<dyn Store>,
}

impl DeveloperService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub async fn list(&self) -> Result<Vec<DeveloperView>, ServiceError> {
        let developers = Repository::<Developer>::list(self.store()).await?;
        let roles = name_index::<Role>(self.store()).await?;
        let teams = name_index::<Team>(self.store()).await?;
        debug!("Listed {} developers", developers.len());

        Ok(developers
            .into_iter()
            .map(|d| {
                let role_name = roles.get(&d.role_id).cloned();
                let team_name = teams.get(&d.team_id).cloned();
                DeveloperView::new(d, role_name, team_name)
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<DeveloperView, ServiceError> {
        let developer = self.find(id).await?;
        self.view(developer).await
    }

    pub async fn create(&self, input: DeveloperInput) -> Result<DeveloperView, ServiceError> {
        let (fields, role, team) = self.validate(input).await?;

        let developer = Repository::<Developer>::insert(self.store(), fields)
            .await
            .map_err(write_error)?;

        info!(
            "Created developer {} (role {}, team {})",
            developer.id, developer.role_id, developer.team_id
        );
        Ok(DeveloperView::new(developer, Some(role.name), Some(team.name)))
    }

    /// Replace every field of an existing developer, including its role and team.
    pub async fn update(&self, id: i32, input: DeveloperInput) -> Result<DeveloperView, ServiceError> {
        self.find(id).await?;
        let (fields, role, team) = self.validate(input).await?;

        let developer = Repository::<Developer>::update(self.store(), id, fields)
            .await
            .map_err(write_error)?
            .ok_or_else(|| ServiceError::not_found(TITLE, id))?;

        info!("Updated developer {}", id);
        Ok(DeveloperView::new(developer, Some(role.name), Some(team.name)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !Repository::<Developer>::delete(self.store(), id).await? {
            return Err(ServiceError::not_found(TITLE, id));
        }
        info!("Deleted developer {}", id);
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Developer, ServiceError> {
        Repository::<Developer>::find_by_id(self.store(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TITLE, id))
    }

    async fn view(&self, developer: Developer) -> Result<DeveloperView, ServiceError> {
        let role = find_parent::<Role>(self.store(), developer.role_id).await?;
        let team = find_parent::<Team>(self.store(), developer.team_id).await?;
        Ok(DeveloperView::new(
            developer,
            role.map(|r| r.name),
            team.map(|t| t.name),
        ))
    }

    async fn validate(&self, input: DeveloperInput) -> Result<(DeveloperFields, Role, Team), ServiceError> {
        let firstname = required_text(input.firstname, "firstname", "Firstname")?;
        let lastname = required_text(input.lastname, "lastname", "Lastname")?;
        let role_id = input.role_id.unwrap_or(0);
        let team_id = input.team_id.unwrap_or(0);

        let role = find_parent::<Role>(self.store(), role_id).await?;
        let team = find_parent::<Team>(self.store(), team_id).await?;

        match (role, team) {
            (Some(role), Some(team)) => {
                let fields = DeveloperFields {
                    firstname,
                    lastname,
                    role_id,
                    team_id,
                };
                Ok((fields, role, team))
            }
            (role, team) => {
                let mut invalid = Vec::new();
                if role.is_none() {
                    invalid.push("roleId");
                }
                if team.is_none() {
                    invalid.push("teamId");
                }
                Err(ServiceError::invalid_fields(INVALID_REFERENCES, invalid))
            }
        }
    }
}

// A parent deleted between validation and write surfaces as a foreign-key violation.
fn write_error(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::ForeignKeyViolation { .. } => {
            ServiceError::invalid_fields(INVALID_REFERENCES, vec!["roleId", "teamId"])
        }
        other => other.into(),
    }
}
