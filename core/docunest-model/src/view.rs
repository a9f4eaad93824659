//! Serializable projections of a document record.
//!
//! Field names are camelCase to match the web client.

use crate::document::{DocumentRecord, Visibility};
use docunest_types::{DocumentId, Timestamp};
use serde::{Deserialize, Serialize};

/// What any permitted caller may learn about a document.
///
/// Carries whether a password is set, never the token, and no locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub is_public: bool,
    pub password_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&DocumentRecord> for DocumentSummary {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            id: record.id,
            title: record.metadata.title.clone(),
            description: record.metadata.description.clone(),
            file_name: record.metadata.file_name.clone(),
            file_type: record.metadata.mime_type.clone(),
            file_size: record.metadata.size_bytes,
            is_public: record.is_public(),
            password_enabled: record.password_enabled(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// The owner's view: the summary plus the locator and visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDocumentView {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    pub visibility: Visibility,
    pub file_url: String,
}

impl OwnerDocumentView {
    pub fn new(record: &DocumentRecord, file_url: impl Into<String>) -> Self {
        Self {
            summary: DocumentSummary::from(record),
            visibility: record.visibility,
            file_url: file_url.into(),
        }
    }
}
