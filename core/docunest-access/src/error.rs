use docunest_blobstore::BlobStoreError;
use docunest_storage::StorageError;
use thiserror::Error;

pub type AccessResult<T> = Result<T, AccessError>;

/// Failures of the owner write path and infrastructure failures of the read
/// path. Access denials on the read path are [`crate::Denial`] values.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    /// Absent, or not owned by the caller.
    #[error("document not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("persistence failure: {0}")]
    Persistence(StorageError),

    #[error("blob storage failure: {0}")]
    BlobStore(BlobStoreError),
}

impl AccessError {
    /// True for failures of a collaborator, which callers may retry.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AccessError::Persistence(_) | AccessError::BlobStore(_))
    }
}

impl From<StorageError> for AccessError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AccessError::NotFound,
            StorageError::Model(e) => AccessError::InvalidInput(e.to_string()),
            other => AccessError::Persistence(other),
        }
    }
}

impl From<BlobStoreError> for AccessError {
    fn from(err: BlobStoreError) -> Self {
        if err.is_rejection() {
            AccessError::InvalidInput(err.to_string())
        } else {
            AccessError::BlobStore(err)
        }
    }
}
