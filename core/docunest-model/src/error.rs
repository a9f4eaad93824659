use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Violations of the document record invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("file name must not be empty")]
    EmptyFileName,

    #[error("resource locator must not be empty")]
    EmptyLocator,

    #[error("password protection is enabled but the stored token is empty")]
    EmptyToken,

    #[error("unknown visibility: {0}")]
    UnknownVisibility(String),
}
