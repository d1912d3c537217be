use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};

use crate::database::manager::DatabaseError;
use crate::database::models::{Developer, Project, ProjectType, Role, Team};

/// `query_as` builder bound to Postgres, used when binding writable columns.
pub type PgQueryAs<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// A foreign-key value held by a row: the parent table and the parent id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: &'static str,
    pub id: i32,
}

/// A persisted record type with a server-assigned integer identity.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    /// Every mutable column, as written by create and update.
    type Fields: Clone + Send + Sync + 'static;

    const TABLE: &'static str;
    /// Name reported when the backing table is missing, e.g. "Teams".
    const SET_NAME: &'static str;
    /// Writable columns in the order `bind_fields` binds them.
    const COLUMNS: &'static [&'static str];
    /// Column carrying a unique display name, if the entity has one.
    const NAME_COLUMN: Option<&'static str> = None;

    fn id(&self) -> i32;

    fn from_fields(id: i32, fields: Self::Fields) -> Self;

    fn bind_fields<'q>(query: PgQueryAs<'q, Self>, fields: Self::Fields) -> PgQueryAs<'q, Self>;

    fn unique_name(&self) -> Option<&str> {
        None
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

/// Persistence gateway for a single entity type.
///
/// Every mutating call is its own unit of work: it is committed by the time
/// the returned future resolves, and a failed call leaves the store unchanged.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<E>, DatabaseError>;

    /// Looks a row up by its unique name. Entities without a name column
    /// never match.
    async fn find_by_name(&self, name: &str) -> Result<Option<E>, DatabaseError>;

    async fn insert(&self, fields: E::Fields) -> Result<E, DatabaseError>;

    /// Overwrites every mutable column. `Ok(None)` when the id does not exist.
    async fn update(&self, id: i32, fields: E::Fields) -> Result<Option<E>, DatabaseError>;

    /// `Ok(false)` when the id does not exist.
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;
}

/// The full relational store: one repository per entity plus liveness.
#[async_trait]
pub trait Store:
    Repository<ProjectType>
    + Repository<Team>
    + Repository<Role>
    + Repository<Developer>
    + Repository<Project>
    + Send
    + Sync
    + 'static
{
    async fn ping(&self) -> Result<(), DatabaseError>;
}
