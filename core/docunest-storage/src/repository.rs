use crate::error::StorageResult;
use docunest_model::{DocumentRecord, PasswordProtection, Visibility};
use docunest_types::{DocumentId, UserId};

/// Persistence boundary for document records.
///
/// Implementations must be safe to share across request handlers. Reads are
/// point-in-time; concurrent writes are last-write-wins.
pub trait DocumentRepository: Send + Sync {
    /// Looks a document up by id regardless of owner.
    fn find_document(&self, id: &DocumentId) -> StorageResult<Option<DocumentRecord>>;

    /// Looks a document up by id, returning it only if `owner` owns it.
    fn find_document_owned_by(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> StorageResult<Option<DocumentRecord>>;

    /// Sets the visibility of a document owned by `owner`.
    fn update_visibility(
        &self,
        id: &DocumentId,
        owner: &UserId,
        visibility: Visibility,
    ) -> StorageResult<DocumentRecord>;

    /// Replaces the password protection of a document owned by `owner`.
    fn update_password_protection(
        &self,
        id: &DocumentId,
        owner: &UserId,
        protection: PasswordProtection,
    ) -> StorageResult<DocumentRecord>;

    /// Persists a new record.
    fn insert_document(&self, record: &DocumentRecord) -> StorageResult<()>;

    /// Deletes a document owned by `owner`, returning the removed record.
    fn delete_document(&self, id: &DocumentId, owner: &UserId) -> StorageResult<DocumentRecord>;

    /// All documents owned by `owner`, newest first.
    fn list_owned_by(&self, owner: &UserId) -> StorageResult<Vec<DocumentRecord>>;

    /// All public documents, newest first.
    fn list_public(&self) -> StorageResult<Vec<DocumentRecord>>;
}
