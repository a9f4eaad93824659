//! Local filesystem storage.
//!
//! Objects live as flat files under a root directory; locators are
//! `<public_base_url>/<key>`, so whatever serves `public_base_url` (the
//! DocuNest server's `/files` route, or a static file server) makes them
//! downloadable.

use crate::error::{BlobStoreError, BlobStoreResult};
use crate::key::ObjectKey;
use crate::provider::StorageProvider;
use async_trait::async_trait;
use docunest_model::DocumentRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Filesystem-backed [`StorageProvider`].
#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskStorage {
    /// Opens the store, creating the root directory if needed.
    pub async fn open(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> BlobStoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        info!(root = %root.display(), base = %public_base_url, "opened local document storage");
        Ok(Self {
            root,
            public_base_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The locator a key resolves to.
    pub fn locator_for(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Extracts the key from a locator this store produced.
    pub fn key_from_locator(&self, locator: &str) -> BlobStoreResult<ObjectKey> {
        let key = locator
            .strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| BlobStoreError::UnknownLocator(locator.to_string()))?;
        ObjectKey::parse(key).map_err(|_| BlobStoreError::UnknownLocator(locator.to_string()))
    }

    /// Reads an object's bytes.
    pub async fn read(&self, key: &ObjectKey) -> BlobStoreResult<Vec<u8>> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &ObjectKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

#[async_trait]
impl StorageProvider for LocalDiskStorage {
    fn provider_name(&self) -> &'static str {
        "local-disk"
    }

    fn resolve_locator(&self, record: &DocumentRecord) -> BlobStoreResult<String> {
        let key = self.key_from_locator(&record.resource_locator)?;
        Ok(self.locator_for(&key))
    }

    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: &[u8],
        _content_type: &str,
    ) -> BlobStoreResult<String> {
        let path = self.path_for(key);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(BlobStoreError::AlreadyExists(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(bytes).await?;
        file.sync_all().await?;

        debug!(key = %key, size = bytes.len(), "stored object");
        Ok(self.locator_for(key))
    }

    async fn delete(&self, locator: &str) -> BlobStoreResult<()> {
        let key = self.key_from_locator(locator)?;
        match fs::remove_file(self.path_for(&key)).await {
            Ok(()) => {
                debug!(key = %key, "deleted object");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
