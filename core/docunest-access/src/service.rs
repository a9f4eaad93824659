//! Owner operations: upload, settings changes, deletion, listing.

use crate::error::{AccessError, AccessResult};
use crate::identity::Caller;
use docunest_blobstore::{ObjectKey, StorageProvider, UploadPolicy};
use docunest_crypto::PasswordCipher;
use docunest_model::{
    DocumentMetadata, DocumentRecord, OwnerDocumentView, PasswordProtection, Visibility,
};
use docunest_storage::DocumentRepository;
use docunest_types::{DocumentId, Timestamp};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// A file submitted for upload.
pub struct NewUpload {
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub visibility: Visibility,
    /// Download password to protect the document with, if any.
    pub password: Option<String>,
}

impl fmt::Debug for NewUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUpload")
            .field("title", &self.title)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .field("visibility", &self.visibility)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Requested change to a document's download password.
#[derive(Clone, PartialEq, Eq)]
pub enum PasswordSetting {
    /// Remove protection.
    Disable,
    /// Enable protection with a new password, or keep the current one when
    /// `None`.
    Enable(Option<String>),
}

impl fmt::Debug for PasswordSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordSetting::Disable => f.write_str("Disable"),
            PasswordSetting::Enable(None) => f.write_str("Enable(keep)"),
            PasswordSetting::Enable(Some(_)) => f.write_str("Enable([REDACTED])"),
        }
    }
}

/// Write path for document owners.
///
/// Every operation re-checks ownership through the repository; a document
/// owned by someone else is reported exactly like a missing one.
#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn StorageProvider>,
    cipher: Arc<PasswordCipher>,
    policy: UploadPolicy,
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn StorageProvider>,
        cipher: Arc<PasswordCipher>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            documents,
            storage,
            cipher,
            policy,
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        self.policy
    }

    /// Stores the file, then the record. The record starts with the
    /// requested visibility and, if a password was given, its encrypted
    /// token.
    pub async fn upload(&self, caller: &Caller, upload: NewUpload) -> AccessResult<OwnerDocumentView> {
        let owner = caller.require_user()?.clone();

        let title = upload.title.trim();
        if title.is_empty() {
            return Err(AccessError::InvalidInput("title is required".into()));
        }
        if upload.file_name.is_empty() {
            return Err(AccessError::InvalidInput("file name is required".into()));
        }
        let protection = match upload.password.as_deref() {
            None => PasswordProtection::Absent,
            Some(pw) => PasswordProtection::Enabled(self.seal(pw)?),
        };
        self.policy
            .check(&upload.content_type, upload.bytes.len() as u64)?;

        let key = ObjectKey::for_upload(&owner, Timestamp::now(), &upload.file_name);
        let locator = self
            .storage
            .upload(&key, &upload.bytes, &upload.content_type)
            .await?;

        let metadata = DocumentMetadata {
            title: title.to_string(),
            description: upload.description.filter(|d| !d.trim().is_empty()),
            file_name: upload.file_name,
            mime_type: upload.content_type,
            size_bytes: upload.bytes.len() as u64,
        };
        let mut record = DocumentRecord::new(owner, locator.clone(), metadata)
            .map_err(|e| AccessError::InvalidInput(e.to_string()))?;
        record.visibility = upload.visibility;
        record.password_protection = protection;

        if let Err(e) = self.documents.insert_document(&record) {
            self.discard_blob(&locator).await;
            return Err(e.into());
        }

        info!(
            document = %record.id,
            provider = self.storage.provider_name(),
            size = record.metadata.size_bytes,
            public = record.is_public(),
            protected = record.password_enabled(),
            "document uploaded"
        );
        self.owner_view(&record)
    }

    /// The caller's own document.
    pub fn get(&self, caller: &Caller, id: &DocumentId) -> AccessResult<OwnerDocumentView> {
        let owner = caller.require_user()?;
        let record = self
            .documents
            .find_document_owned_by(id, owner)?
            .ok_or(AccessError::NotFound)?;
        self.owner_view(&record)
    }

    pub fn set_visibility(
        &self,
        caller: &Caller,
        id: &DocumentId,
        visibility: Visibility,
    ) -> AccessResult<OwnerDocumentView> {
        let owner = caller.require_user()?;
        let record = self.documents.update_visibility(id, owner, visibility)?;
        info!(document = %id, %visibility, "visibility changed");
        self.owner_view(&record)
    }

    pub fn set_password(
        &self,
        caller: &Caller,
        id: &DocumentId,
        setting: PasswordSetting,
    ) -> AccessResult<OwnerDocumentView> {
        let owner = caller.require_user()?;

        let protection = match setting {
            PasswordSetting::Disable => PasswordProtection::Absent,
            PasswordSetting::Enable(Some(pw)) => PasswordProtection::Enabled(self.seal(&pw)?),
            PasswordSetting::Enable(None) => {
                let current = self
                    .documents
                    .find_document_owned_by(id, owner)?
                    .ok_or(AccessError::NotFound)?;
                if !current.password_enabled() {
                    return Err(AccessError::InvalidInput(
                        "a password is required to enable protection".into(),
                    ));
                }
                return self.owner_view(&current);
            }
        };

        let enabled = protection.is_enabled();
        let record = self.documents.update_password_protection(id, owner, protection)?;
        info!(document = %id, protected = enabled, "password protection changed");
        self.owner_view(&record)
    }

    /// Removes the record, then its stored bytes. A failure to remove the
    /// bytes is logged; the document is gone either way.
    pub async fn delete(&self, caller: &Caller, id: &DocumentId) -> AccessResult<()> {
        let owner = caller.require_user()?;
        let record = self.documents.delete_document(id, owner)?;
        self.discard_blob(&record.resource_locator).await;
        info!(document = %id, "document deleted");
        Ok(())
    }

    /// The caller's documents, newest first.
    pub fn list_mine(&self, caller: &Caller) -> AccessResult<Vec<OwnerDocumentView>> {
        let owner = caller.require_user()?;
        self.documents
            .list_owned_by(owner)?
            .iter()
            .map(|record| self.owner_view(record))
            .collect()
    }

    fn seal(&self, password: &str) -> AccessResult<String> {
        if password.is_empty() {
            return Err(AccessError::InvalidInput("password must not be empty".into()));
        }
        Ok(self.cipher.encrypt(password))
    }

    fn owner_view(&self, record: &DocumentRecord) -> AccessResult<OwnerDocumentView> {
        let file_url = self.storage.resolve_locator(record)?;
        Ok(OwnerDocumentView::new(record, file_url))
    }

    async fn discard_blob(&self, locator: &str) {
        if let Err(e) = self.storage.delete(locator).await {
            warn!(
                provider = self.storage.provider_name(),
                error = %e,
                "failed to remove stored document bytes"
            );
        }
    }
}
