pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use std::sync::Arc;

use tracing::warn;

use crate::config::DatabaseConfig;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{Entity, Reference, Repository, Store};

/// Postgres when a URL is configured, otherwise a process-local store.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    match config.url {
        Some(_) => Ok(Arc::new(PgStore::connect(config).await?)),
        None => {
            warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
