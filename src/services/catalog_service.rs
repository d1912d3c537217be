use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::database::models::{NameFields, ProjectType, Role, Team};
use crate::database::{DatabaseError, Entity, Repository, Store};

use super::{required_text, ServiceError};

/// An entity that is nothing more than a unique name: project types, teams
/// and roles. Its row doubles as its transfer shape.
pub trait CatalogEntity: Entity<Fields = NameFields> + Serialize {
    /// Lower-case noun for messages, e.g. "project type".
    const NOUN: &'static str;
    /// Capitalised noun for messages, e.g. "Project type".
    const TITLE: &'static str;

    fn name(&self) -> &str;
}

impl CatalogEntity for ProjectType {
    const NOUN: &'static str = "project type";
    const TITLE: &'static str = "Project type";

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntity for Team {
    const NOUN: &'static str = "team";
    const TITLE: &'static str = "Team";

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntity for Role {
    const NOUN: &'static str = "role";
    const TITLE: &'static str = "Role";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Request body for creating or replacing a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameInput {
    pub name: Option<String>,
}

impl NameInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

pub struct CatalogService<E> {
    store: Arc<dyn Store>,
    _entity: PhantomData<fn() -> E>,
}

pub type ProjectTypeService = CatalogService<ProjectType>;
pub type TeamService = CatalogService<Team>;
pub type RoleService = CatalogService<Role>;

impl<E> Clone for CatalogService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> CatalogService<E>
where
    E: CatalogEntity,
    dyn Store: Repository<E>,
{
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub async fn list(&self) -> Result<Vec<E>, ServiceError> {
        let rows = Repository::<E>::list(self.store()).await?;
        debug!("Listed {} rows from {}", rows.len(), E::TABLE);
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<E, ServiceError> {
        Repository::<E>::find_by_id(self.store(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::TITLE, id))
    }

    pub async fn create(&self, input: NameInput) -> Result<E, ServiceError> {
        let name = required_text(input.name, "name", "Name")?;
        self.ensure_name_available(&name, None).await?;

        let row = Repository::<E>::insert(self.store(), NameFields::new(name.as_str()))
            .await
            .map_err(|err| Self::write_error(err, &name))?;

        info!("Created {} {} ({})", E::NOUN, row.id(), name);
        Ok(row)
    }

    /// Replace the name of an existing entry. The entry may keep its own name.
    pub async fn update(&self, id: i32, input: NameInput) -> Result<E, ServiceError> {
        self.get(id).await?;
        let name = required_text(input.name, "name", "Name")?;
        self.ensure_name_available(&name, Some(id)).await?;

        let row = Repository::<E>::update(self.store(), id, NameFields::new(name.as_str()))
            .await
            .map_err(|err| Self::write_error(err, &name))?
            .ok_or_else(|| ServiceError::not_found(E::TITLE, id))?;

        info!("Updated {} {} ({})", E::NOUN, id, name);
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        match Repository::<E>::delete(self.store(), id).await {
            Ok(true) => {
                info!("Deleted {} {}", E::NOUN, id);
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found(E::TITLE, id)),
            Err(DatabaseError::ForeignKeyViolation { .. }) => {
                warn!("Refused to delete {} {}: still referenced", E::NOUN, id);
                Err(ServiceError::still_referenced(E::TITLE, id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn ensure_name_available(&self, name: &str, current: Option<i32>) -> Result<(), ServiceError> {
        match Repository::<E>::find_by_name(self.store(), name).await? {
            Some(existing) if Some(existing.id()) != current => Err(Self::duplicate(name)),
            _ => Ok(()),
        }
    }

    fn duplicate(name: &str) -> ServiceError {
        ServiceError::validation(
            format!("A {} with the name '{}' already exists.", E::NOUN, name),
            "name",
        )
    }

    // A concurrent writer can claim the name between the check and the write;
    // the store's unique constraint reports it here.
    fn write_error(err: DatabaseError, name: &str) -> ServiceError {
        match err {
            DatabaseError::UniqueViolation { .. } => Self::duplicate(name),
            other => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn teams() -> TeamService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = teams();
        let created = service.create(NameInput::new("Core")).await.unwrap();
        assert_eq!(created, Team { id: 1, name: "Core".to_string() });
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_trims_the_name() {
        let service = teams();
        let created = service.create(NameInput::new("  Core  ")).await.unwrap();
        assert_eq!(created.name, "Core");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_writing() {
        let service = teams();
        let err = service.create(NameInput::new("   ")).await.unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");

        let err = service.create(NameInput::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_writing() {
        let service = teams();
        service.create(NameInput::new("Core")).await.unwrap();
        let err = service.create(NameInput::new("Core")).await.unwrap_err();
        assert_eq!(err.to_string(), "A team with the name 'Core' already exists.");
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_message_names_the_entity() {
        let service: ProjectTypeService = CatalogService::new(Arc::new(MemoryStore::new()));
        service.create(NameInput::new("Web")).await.unwrap();
        let err = service.create(NameInput::new("Web")).await.unwrap_err();
        assert_eq!(err.to_string(), "A project type with the name 'Web' already exists.");
    }

    #[tokio::test]
    async fn update_replaces_the_name() {
        let service = teams();
        let team = service.create(NameInput::new("Core")).await.unwrap();
        let updated = service.update(team.id, NameInput::new("Platform")).await.unwrap();
        assert_eq!(updated.name, "Platform");
        assert_eq!(service.get(team.id).await.unwrap().name, "Platform");
    }

    #[tokio::test]
    async fn update_may_keep_the_same_name() {
        let service = teams();
        let team = service.create(NameInput::new("Core")).await.unwrap();
        assert!(service.update(team.id, NameInput::new("Core")).await.is_ok());
    }

    #[tokio::test]
    async fn update_cannot_take_another_entries_name() {
        let service = teams();
        service.create(NameInput::new("Core")).await.unwrap();
        let web = service.create(NameInput::new("Web")).await.unwrap();
        let err = service.update(web.id, NameInput::new("Core")).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(web.id).await.unwrap().name, "Web");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = teams();
        assert!(service.get(9).await.unwrap_err().is_not_found());
        assert!(service.update(9, NameInput::new("X")).await.unwrap_err().is_not_found());
        assert!(service.delete(9).await.unwrap_err().is_not_found());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() {
        let service = teams();
        let err = service.update(9, NameInput::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = teams();
        let team = service.create(NameInput::new("Core")).await.unwrap();
        service.delete(team.id).await.unwrap();
        assert!(service.get(team.id).await.unwrap_err().is_not_found());
        assert!(service.delete(team.id).await.unwrap_err().is_not_found());
    }
}
