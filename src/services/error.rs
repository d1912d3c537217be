use thiserror::Error;

use crate::database::DatabaseError;

/// Failures of a resource operation, before they are mapped onto HTTP.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected; `fields` names the offending input fields.
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<&'static str>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>, field: &'static str) -> Self {
        ServiceError::Validation {
            message: message.into(),
            fields: vec![field],
        }
    }

    pub fn invalid_fields(message: impl Into<String>, fields: Vec<&'static str>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            fields,
        }
    }

    pub fn not_found(title: &str, id: i32) -> Self {
        ServiceError::NotFound(format!("{} with id {} was not found.", title, id))
    }

    pub fn still_referenced(title: &str, id: i32) -> Self {
        ServiceError::Conflict(format!(
            "{} with id {} is still referenced by other records.",
            title, id
        ))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotConfigured(set) => {
                ServiceError::NotFound(format!("Entity set '{}' is null.", set))
            }
            other => ServiceError::Database(other),
        }
    }
}
