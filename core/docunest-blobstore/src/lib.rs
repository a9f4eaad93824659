//! Storage providers for uploaded document bytes.
//!
//! Documents never carry their bytes around; a record holds an opaque
//! resource locator produced by a [`StorageProvider`] at upload time, and the
//! access core asks the same provider to resolve it when a view or download
//! is granted.

mod error;
mod key;
mod local;
mod memory;
mod policy;
mod provider;

pub use error::{BlobStoreError, BlobStoreResult};
pub use key::{ObjectKey, MAX_KEY_LEN};
pub use local::LocalDiskStorage;
pub use memory::MemoryStorage;
pub use policy::{UploadPolicy, ACCEPTED_CONTENT_TYPES, DEFAULT_MAX_UPLOAD_BYTES};
pub use provider::StorageProvider;
