//! Object keys.
//!
//! Keys are restricted to ASCII alphanumerics and `_`, which keeps them safe
//! as file names and URL path segments without further escaping.

use crate::error::{BlobStoreError, BlobStoreResult};
use docunest_types::{Timestamp, UserId};
use std::fmt;

pub const MAX_KEY_LEN: usize = 255;

/// Longest file-name component kept in a generated key.
const MAX_NAME_COMPONENT: usize = 96;

/// Validated storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Builds the key for a new upload: `<owner>_<millis>_<file name>`, with
    /// every character outside `[A-Za-z0-9]` replaced by `_`.
    pub fn for_upload(owner: &UserId, at: Timestamp, file_name: &str) -> Self {
        let mut name = sanitize(file_name);
        name.truncate(MAX_NAME_COMPONENT);
        if name.is_empty() {
            name.push_str("file");
        }
        let mut key = format!("{}_{}_{}", sanitize(owner.as_str()), at.as_millis(), name);
        key.truncate(MAX_KEY_LEN);
        Self(key)
    }

    /// Parses a key received from outside (e.g. a URL path segment).
    pub fn parse(s: &str) -> BlobStoreResult<Self> {
        if s.is_empty() || s.len() > MAX_KEY_LEN {
            return Err(BlobStoreError::InvalidKey(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(BlobStoreError::InvalidKey(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Content type implied by the sanitized extension at the end of the key,
    /// `application/octet-stream` when it names no accepted document type.
    pub fn content_type(&self) -> &'static str {
        let ext = self.0.rsplit('_').next().unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "doc" => "application/msword",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
