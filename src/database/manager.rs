use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// The backing table for an entity set does not exist.
    #[error("Entity set '{0}' is not available")]
    NotConfigured(&'static str),

    #[error("Unique constraint violated on {table}")]
    UniqueViolation { table: &'static str },

    #[error("Foreign key constraint violated on {table}")]
    ForeignKeyViolation { table: &'static str },

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

// Postgres SQLSTATE for a missing relation.
const UNDEFINED_TABLE: &str = "42P01";

impl DatabaseError {
    /// Classifies a driver error raised while touching `table`.
    pub(crate) fn from_sqlx(err: sqlx::Error, table: &'static str, set_name: &'static str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() && is_name_constraint(table, db_err.constraint()) {
                return DatabaseError::UniqueViolation { table };
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::ForeignKeyViolation { table };
            }
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE) {
                return DatabaseError::NotConfigured(set_name);
            }
        }
        DatabaseError::Sqlx(err)
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::Sqlx(sqlx::Error::Io(_))
                | DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
                | DatabaseError::Sqlx(sqlx::Error::PoolClosed)
        )
    }
}

/// Only `<table>_name_key` reports a duplicate name.
fn is_name_constraint(table: &str, constraint: Option<&str>) -> bool {
    constraint
        .and_then(|c| c.strip_prefix(table))
        .map_or(false, |rest| rest == "_name_key")
}

/// Connection pool construction and schema migration for the Postgres store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool against `database.url`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let redacted = Self::redacted_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", redacted);
        Ok(pool)
    }

    /// Apply the bundled migrations in `migrations/`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Connection string with the password stripped, safe for logs
    pub fn redacted_url(url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
