//! Domain error type shared by the store and service layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row addressed by id does not exist (breaker, lock, personnel, plan).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The supplied access code did not match.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is in Visitor mode and attempted a mutation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Validation error for a required text field that is empty or whitespace.
    pub fn blank(field: &str) -> Self {
        CoreError::Validation(format!("'{field}' must not be empty"))
    }
}

/// Reject a required text field that is empty after trimming.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::blank(field))
    } else {
        Ok(())
    }
}
