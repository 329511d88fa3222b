//! Book store error types.

use thiserror::Error;

/// Errors that can occur during book store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Duplicate entity (unique key violation).
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    /// Returns true for unique key violations.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Result type for book store operations.
pub type StoreResult<T> = Result<T, StoreError>;
