//! Document record persistence for DocuNest.
//!
//! The access core depends only on the [`DocumentRepository`] trait. Two
//! implementations are provided:
//!
//! - [`SqliteDocumentStore`]: a single SQLite file (or in-memory database)
//!   guarded by a mutex; the production backend
//! - [`MemoryDocumentStore`]: a `HashMap` behind an `RwLock`, for tests and
//!   embedding
//!
//! Ownership-scoped operations (`update_*`, `delete_document`) fail with
//! [`StorageError::NotFound`] both when the document does not exist and when
//! it belongs to someone else; callers cannot tell the two apart.

mod error;
mod memory;
mod repository;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryDocumentStore;
pub use repository::DocumentRepository;
pub use sqlite::SqliteDocumentStore;
