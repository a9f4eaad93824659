//! In-memory document store.

use crate::error::{StorageError, StorageResult};
use crate::repository::DocumentRepository;
use docunest_model::{DocumentRecord, ModelError, PasswordProtection, Visibility};
use docunest_types::{DocumentId, Timestamp, UserId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Non-persistent [`DocumentRepository`] for tests and embedding.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, DocumentRecord>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<DocumentId, DocumentRecord>>> {
        self.documents.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<DocumentId, DocumentRecord>>> {
        self.documents.write().map_err(|_| StorageError::LockPoisoned)
    }

    fn update_owned(
        &self,
        id: &DocumentId,
        owner: &UserId,
        apply: impl FnOnce(&mut DocumentRecord),
    ) -> StorageResult<DocumentRecord> {
        let mut docs = self.write()?;
        let record = docs
            .get_mut(id)
            .filter(|r| r.is_owned_by(owner))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        apply(record);
        record.updated_at = Timestamp::now().max(record.updated_at);
        Ok(record.clone())
    }
}

fn newest_first(mut records: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.as_uuid().cmp(&a.id.as_uuid()))
    });
    records
}

impl DocumentRepository for MemoryDocumentStore {
    fn find_document(&self, id: &DocumentId) -> StorageResult<Option<DocumentRecord>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_document_owned_by(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> StorageResult<Option<DocumentRecord>> {
        Ok(self.read()?.get(id).filter(|r| r.is_owned_by(owner)).cloned())
    }

    fn update_visibility(
        &self,
        id: &DocumentId,
        owner: &UserId,
        visibility: Visibility,
    ) -> StorageResult<DocumentRecord> {
        self.update_owned(id, owner, |r| r.visibility = visibility)
    }

    fn update_password_protection(
        &self,
        id: &DocumentId,
        owner: &UserId,
        protection: PasswordProtection,
    ) -> StorageResult<DocumentRecord> {
        if protection.token() == Some("") {
            return Err(ModelError::EmptyToken.into());
        }
        self.update_owned(id, owner, |r| r.password_protection = protection)
    }

    fn insert_document(&self, record: &DocumentRecord) -> StorageResult<()> {
        record.validate()?;
        let mut docs = self.write()?;
        if docs.contains_key(&record.id) {
            return Err(StorageError::Duplicate(record.id.to_string()));
        }
        docs.insert(record.id, record.clone());
        Ok(())
    }

    fn delete_document(&self, id: &DocumentId, owner: &UserId) -> StorageResult<DocumentRecord> {
        let mut docs = self.write()?;
        match docs.get(id) {
            Some(r) if r.is_owned_by(owner) => docs
                .remove(id)
                .ok_or_else(|| StorageError::NotFound(id.to_string())),
            _ => Err(StorageError::NotFound(id.to_string())),
        }
    }

    fn list_owned_by(&self, owner: &UserId) -> StorageResult<Vec<DocumentRecord>> {
        let docs = self.read()?;
        Ok(newest_first(
            docs.values().filter(|r| r.is_owned_by(owner)).cloned().collect(),
        ))
    }

    fn list_public(&self) -> StorageResult<Vec<DocumentRecord>> {
        let docs = self.read()?;
        Ok(newest_first(
            docs.values().filter(|r| r.is_public()).cloned().collect(),
        ))
    }
}
