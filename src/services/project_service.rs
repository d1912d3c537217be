use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::models::{Project, ProjectFields, ProjectType, Team};
use crate::database::{DatabaseError, Repository, Store};

use super::{find_parent, name_index, required_text, ServiceError};

const TITLE: &str = "Project";

/// A project as returned to clients, carrying its project type and team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: i32,
    pub name: String,
    pub project_type_id: i32,
    pub project_type_name: Option<String>,
    pub team_id: i32,
    pub team_name: Option<String>,
}

impl ProjectView {
    fn new(project: Project, project_type_name: Option<String>, team_name: Option<String>) -> Self {
        Self {
            id: project.id,
            name: project.name,
            project_type_id: project.project_type_id,
            project_type_name,
            team_id: project.team_id,
            team_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub project_type_id: Option<i32>,
    pub team_id: Option<i32>,
}

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub async fn list(&self) -> Result<Vec<ProjectView>, ServiceError> {
        let projects = Repository::<Project>::list(self.store()).await?;
        let project_types = name_index::<ProjectType>(self.store()).await?;
        let teams = name_index::<Team>(self.store()).await?;
        debug!("Listed {} projects", projects.len());

        Ok(projects
            .into_iter()
            .map(|p| {
                let type_name = project_types.get(&p.project_type_id).cloned();
                let team_name = teams.get(&p.team_id).cloned();
                ProjectView::new(p, type_name, team_name)
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<ProjectView, ServiceError> {
        let project = self.find(id).await?;
        let project_type = find_parent::<ProjectType>(self.store(), project.project_type_id).await?;
        let team = find_parent::<Team>(self.store(), project.team_id).await?;
        Ok(ProjectView::new(
            project,
            project_type.map(|pt| pt.name),
            team.map(|t| t.name),
        ))
    }

    pub async fn create(&self, input: ProjectInput) -> Result<ProjectView, ServiceError> {
        let (fields, project_type, team) = self.validate(input).await?;

        let project = Repository::<Project>::insert(self.store(), fields)
            .await
            .map_err(write_error)?;

        info!("Created project {} ({})", project.id, project.name);
        Ok(ProjectView::new(project, Some(project_type.name), Some(team.name)))
    }

    pub async fn update(&self, id: i32, input: ProjectInput) -> Result<ProjectView, ServiceError> {
        self.find(id).await?;
        let (fields, project_type, team) = self.validate(input).await?;

        let project = Repository::<Project>::update(self.store(), id, fields)
            .await
            .map_err(write_error)?
            .ok_or_else(|| ServiceError::not_found(TITLE, id))?;

        info!("Updated project {}", id);
        Ok(ProjectView::new(project, Some(project_type.name), Some(team.name)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !Repository::<Project>::delete(self.store(), id).await? {
            return Err(ServiceError::not_found(TITLE, id));
        }
        info!("Deleted project {}", id);
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Project, ServiceError> {
        Repository::<Project>::find_by_id(self.store(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TITLE, id))
    }

    /// Name first, then positivity of both ids, then existence of both parents.
    async fn validate(&self, input: ProjectInput) -> Result<(ProjectFields, ProjectType, Team), ServiceError> {
        let name = required_text(input.name, "name", "Name")?;
        let project_type_id = input.project_type_id.unwrap_or(0);
        let team_id = input.team_id.unwrap_or(0);

        if project_type_id <= 0 {
            return Err(ServiceError::validation(
                "ProjectTypeId must be a positive integer.",
                "projectTypeId",
            ));
        }
        if team_id <= 0 {
            return Err(ServiceError::validation(
                "TeamId must be a positive integer.",
                "teamId",
            ));
        }

        let project_type = find_parent::<ProjectType>(self.store(), project_type_id)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid ProjectTypeId.", "projectTypeId"))?;
        let team = find_parent::<Team>(self.store(), team_id)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid TeamId.", "teamId"))?;

        let fields = ProjectFields {
            name,
            project_type_id,
            team_id,
        };
        Ok((fields, project_type, team))
    }
}

fn write_error(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::ForeignKeyViolation { .. } => ServiceError::invalid_fields(
            "Invalid ProjectTypeId or TeamId.",
            vec!["projectTypeId", "teamId"],
        ),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NameFields;
    use crate::database::MemoryStore;

    async fn parents(store: &MemoryStore, project_type: &str, team: &str) -> (ProjectType, Team) {
        let project_type = Repository::<ProjectType>::insert(store, NameFields::new(project_type))
            .await
            .unwrap();
        let team = Repository::<Team>::insert(store, NameFields::new(team))
            .await
            .unwrap();
        (project_type, team)
    }

    async fn seeded() -> (ProjectService, ProjectType, Team) {
        let store = Arc::new(MemoryStore::new());
        let (project_type, team) = parents(&store, "Web", "Core").await;
        (ProjectService::new(store), project_type, team)
    }

    fn input(name: &str, project_type_id: i32, team_id: i32) -> ProjectInput {
        ProjectInput {
            name: Some(name.to_string()),
            project_type_id: Some(project_type_id),
            team_id: Some(team_id),
        }
    }

    #[tokio::test]
    async fn create_resolves_parent_names() {
        let (service, project_type, team) = seeded().await;
        let created = service
            .create(input("Portal", project_type.id, team.id))
            .await
            .unwrap();

        assert_eq!(created.project_type_name.as_deref(), Some("Web"));
        assert_eq!(created.team_name.as_deref(), Some("Core"));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn non_positive_ids_name_the_field() {
        let (service, project_type, team) = seeded().await;

        let err = service.create(input("Portal", 0, team.id)).await.unwrap_err();
        assert_eq!(err.to_string(), "ProjectTypeId must be a positive integer.");

        let err = service
            .create(input("Portal", project_type.id, -3))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "TeamId must be a positive integer.");
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_parents_are_rejected() {
        let (service, project_type, team) = seeded().await;

        let err = service.create(input("Portal", 42, team.id)).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid ProjectTypeId.");

        let err = service
            .create(input("Portal", project_type.id, 42))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid TeamId.");
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_names_need_not_be_unique() {
        let (service, project_type, team) = seeded().await;
        service.create(input("Portal", project_type.id, team.id)).await.unwrap();
        service.create(input("Portal", project_type.id, team.id)).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (service, project_type, team) = seeded().await;
        let err = service
            .create(input(" ", project_type.id, team.id))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (service, project_type, team) = seeded().await;
        let created = service
            .create(input("Portal", project_type.id, team.id))
            .await
            .unwrap();

        let updated = service
            .update(created.id, input("Intranet", project_type.id, team.id))
            .await
            .unwrap();
        assert_eq!(updated.name, "Intranet");
        assert_eq!(service.get(created.id).await.unwrap().name, "Intranet");

        assert!(service
            .update(created.id + 1, input("X", project_type.id, team.id))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_foreign_keys() {
        let store = Arc::new(MemoryStore::new());
        let (web, core) = parents(&store, "Web", "Core").await;
        let (mobile, ops) = parents(&store, "Mobile", "Ops").await;
        let service = ProjectService::new(store);
        let created = service.create(input("Portal", web.id, core.id)).await.unwrap();

        let updated = service
            .update(created.id, input("App", mobile.id, ops.id))
            .await
            .unwrap();
        assert_eq!(
            updated,
            ProjectView {
                id: created.id,
                name: "App".to_string(),
                project_type_id: mobile.id,
                project_type_name: Some("Mobile".to_string()),
                team_id: ops.id,
                team_name: Some("Ops".to_string()),
            }
        );
        assert_eq!(service.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn failed_update_leaves_row_untouched() {
        let (service, project_type, team) = seeded().await;
        let created = service
            .create(input("Portal", project_type.id, team.id))
            .await
            .unwrap();

        let err = service
            .update(created.id, input("Intranet", project_type.id, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "TeamId must be a positive integer.");

        let err = service
            .update(created.id, input("Intranet", 99, team.id))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid ProjectTypeId.");

        let err = service
            .update(created.id, input("Intranet", project_type.id, 99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid TeamId.");

        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (service, project_type, team) = seeded().await;
        let created = service
            .create(input("Portal", project_type.id, team.id))
            .await
            .unwrap();
        service.delete(created.id).await.unwrap();
        assert!(service.get(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete(created.id).await.unwrap_err().is_not_found());
    }
}
