//! Entity validation errors.

use thiserror::Error;

/// A field value that violates an entity rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    /// A required text field is empty or whitespace only.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Price is negative or not a finite number.
    #[error("price must be a non-negative number")]
    InvalidPrice,

    /// An update that would not change anything.
    #[error("update must set at least one field")]
    EmptyUpdate,
}

/// Result type for entity validation.
pub type EntityResult<T> = Result<T, EntityError>;
