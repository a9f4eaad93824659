//! In-memory storage provider.

use crate::error::{BlobStoreError, BlobStoreResult};
use crate::key::ObjectKey;
use crate::provider::StorageProvider;
use async_trait::async_trait;
use docunest_model::DocumentRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

const LOCATOR_PREFIX: &str = "memory://";

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Keeps objects in a map; locators are `memory://<key>`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes and content type stored behind a locator.
    pub async fn get(&self, locator: &str) -> Option<(Vec<u8>, String)> {
        let key = locator.strip_prefix(LOCATOR_PREFIX)?;
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn key_of<'a>(&self, locator: &'a str) -> BlobStoreResult<&'a str> {
        locator
            .strip_prefix(LOCATOR_PREFIX)
            .ok_or_else(|| BlobStoreError::UnknownLocator(locator.to_string()))
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    fn resolve_locator(&self, record: &DocumentRecord) -> BlobStoreResult<String> {
        self.key_of(&record.resource_locator)?;
        Ok(record.resource_locator.clone())
    }

    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: &[u8],
        content_type: &str,
    ) -> BlobStoreResult<String> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(key.as_str()) {
            return Err(BlobStoreError::AlreadyExists(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{LOCATOR_PREFIX}{key}"))
    }

    async fn delete(&self, locator: &str) -> BlobStoreResult<()> {
        let key = self.key_of(locator)?;
        self.objects
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| BlobStoreError::NotFound(key.to_string()))
    }
}
