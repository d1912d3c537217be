use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::repository::{Entity, Repository, Store};

/// Relational store backed by a Postgres pool. Every entity shares the same
/// SQL shapes; table and column names come from the `Entity` constants.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, and apply migrations when `run_migrations` is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect(config).await?;
        if config.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Ok(Self::new(pool))
    }
}

fn table_error<E: Entity>(err: sqlx::Error) -> DatabaseError {
    DatabaseError::from_sqlx(err, E::TABLE, E::SET_NAME)
}

fn insert_sql<E: Entity>() -> String {
    let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql<E: Entity>() -> String {
    let assignments: Vec<String> = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE \"{}\" SET {} WHERE id = ${} RETURNING *",
        E::TABLE,
        assignments.join(", "),
        E::COLUMNS.len() + 1
    )
}

#[async_trait]
impl<E: Entity> Repository<E> for PgStore {
    async fn list(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" ORDER BY id", E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(table_error::<E>)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<E>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE id = $1", E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(table_error::<E>)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<E>, DatabaseError> {
        let Some(column) = E::NAME_COLUMN else {
            return Ok(None);
        };
        let sql = format!("SELECT * FROM \"{}\" WHERE {} = $1 LIMIT 1", E::TABLE, column);
        sqlx::query_as::<_, E>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(table_error::<E>)
    }

    async fn insert(&self, fields: E::Fields) -> Result<E, DatabaseError> {
        let sql = insert_sql::<E>();
        E::bind_fields(sqlx::query_as::<_, E>(&sql), fields)
            .fetch_one(&self.pool)
            .await
            .map_err(table_error::<E>)
    }

    async fn update(&self, id: i32, fields: E::Fields) -> Result<Option<E>, DatabaseError> {
        let sql = update_sql::<E>();
        E::bind_fields(sqlx::query_as::<_, E>(&sql), fields)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(table_error::<E>)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(table_error::<E>)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
