//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Document not found, or not owned by the requesting user.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document with the same id already exists.
    #[error("document already exists: {0}")]
    Duplicate(String),

    /// A stored row could not be mapped back to a record.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The record violates a model invariant.
    #[error("invalid record: {0}")]
    Model(#[from] docunest_model::ModelError),

    /// A previous holder of the store lock panicked.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Returns true for "absent or not yours" outcomes, as opposed to
    /// infrastructure failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
