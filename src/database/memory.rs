use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Developer, Project, ProjectType, Role, Team};
use crate::database::repository::{Entity, Reference, Repository, Store};

/// Rows of one entity type plus its id sequence.
#[derive(Debug)]
pub struct Table<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<E: Entity> Table<E> {
    fn name_taken(&self, candidate: &E) -> bool {
        let Some(name) = candidate.unique_name() else {
            return false;
        };
        self.rows
            .values()
            .any(|row| row.id() != candidate.id() && row.unique_name() == Some(name))
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    project_types: Table<ProjectType>,
    teams: Table<Team>,
    roles: Table<Role>,
    developers: Table<Developer>,
    projects: Table<Project>,
}

impl Tables {
    fn contains(&self, reference: &Reference) -> bool {
        let id = &reference.id;
        match reference.table {
            t if t == ProjectType::TABLE => self.project_types.rows.contains_key(id),
            t if t == Team::TABLE => self.teams.rows.contains_key(id),
            t if t == Role::TABLE => self.roles.rows.contains_key(id),
            t if t == Developer::TABLE => self.developers.rows.contains_key(id),
            t if t == Project::TABLE => self.projects.rows.contains_key(id),
            _ => false,
        }
    }

    /// True when any child row still points at `table`/`id`.
    fn is_referenced(&self, table: &'static str, id: i32) -> bool {
        let target = Reference { table, id };
        let developer_refs = self.developers.rows.values().flat_map(|d| d.references());
        let project_refs = self.projects.rows.values().flat_map(|p| p.references());
        developer_refs.chain(project_refs).any(|r| r == target)
    }

    fn check_row<E: MemoryEntity>(&self, candidate: &E) -> Result<(), DatabaseError> {
        if E::table(self).name_taken(candidate) {
            return Err(DatabaseError::UniqueViolation { table: E::TABLE });
        }
        if !candidate.references().iter().all(|r| self.contains(r)) {
            return Err(DatabaseError::ForeignKeyViolation { table: E::TABLE });
        }
        Ok(())
    }
}

/// Binds an entity type to its slot in `Tables`.
pub trait MemoryEntity: Entity {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

macro_rules! memory_entity {
    ($entity:ty, $field:ident) => {
        impl MemoryEntity for $entity {
            fn table(tables: &Tables) -> &Table<Self> {
                &tables.$field
            }

            fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
                &mut tables.$field
            }
        }
    };
}

memory_entity!(ProjectType, project_types);
memory_entity!(Team, teams);
memory_entity!(Role, roles);
memory_entity!(Developer, developers);
memory_entity!(Project, projects);

/// In-process store enforcing the same constraints as the Postgres schema:
/// unique catalog names and restrict-on-delete foreign keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: MemoryEntity> Repository<E> for MemoryStore {
    async fn list(&self) -> Result<Vec<E>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(E::table(&tables).rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<E>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(E::table(&tables).rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<E>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(E::table(&tables)
            .rows
            .values()
            .find(|row| row.unique_name() == Some(name))
            .cloned())
    }

    async fn insert(&self, fields: E::Fields) -> Result<E, DatabaseError> {
        let mut tables = self.tables.write().await;
        let id = E::table(&tables).next_id;
        let row = E::from_fields(id, fields);
        tables.check_row(&row)?;

        let table = E::table_mut(&mut tables);
        table.next_id += 1;
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, fields: E::Fields) -> Result<Option<E>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !E::table(&tables).rows.contains_key(&id) {
            return Ok(None);
        }
        let row = E::from_fields(id, fields);
        tables.check_row(&row)?;

        E::table_mut(&mut tables).rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !E::table(&tables).rows.contains_key(&id) {
            return Ok(false);
        }
        if tables.is_referenced(E::TABLE, id) {
            return Err(DatabaseError::ForeignKeyViolation { table: E::TABLE });
        }
        E::table_mut(&mut tables).rows.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
