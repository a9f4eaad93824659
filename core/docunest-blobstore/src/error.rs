use thiserror::Error;

pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("locator not managed by this provider: {0}")]
    UnknownLocator(String),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object already exists: {0}")]
    AlreadyExists(String),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("object too large: {size} bytes exceeds limit of {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("object is empty")]
    EmptyObject,
}

impl BlobStoreError {
    /// True when the upload itself was unacceptable, as opposed to the
    /// provider failing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BlobStoreError::InvalidKey(_)
                | BlobStoreError::UnsupportedContentType(_)
                | BlobStoreError::TooLarge { .. }
                | BlobStoreError::EmptyObject
        )
    }
}
