//! Storage provider abstraction.

use crate::error::BlobStoreResult;
use crate::key::ObjectKey;
use async_trait::async_trait;
use docunest_model::DocumentRecord;

/// Abstract document byte store.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Returns the name of the provider, for logs.
    fn provider_name(&self) -> &'static str;

    /// Resolves the locator handed to a caller whose view or download was
    /// granted. Never touches the bytes.
    fn resolve_locator(&self, record: &DocumentRecord) -> BlobStoreResult<String>;

    /// Stores `bytes` under `key` and returns the locator to persist on the
    /// record.
    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: &[u8],
        content_type: &str,
    ) -> BlobStoreResult<String>;

    /// Removes the object a locator points at.
    async fn delete(&self, locator: &str) -> BlobStoreResult<()>;
}
