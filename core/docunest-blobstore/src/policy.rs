use crate::error::{BlobStoreError, BlobStoreResult};

/// MIME types accepted for upload: PDF and Word documents.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

/// 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Limits applied to an upload before any bytes reach a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Checks a declared content type and byte size against the policy.
    pub fn check(&self, content_type: &str, size: u64) -> BlobStoreResult<()> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !ACCEPTED_CONTENT_TYPES.contains(&essence.as_str()) {
            return Err(BlobStoreError::UnsupportedContentType(content_type.to_string()));
        }
        if size == 0 {
            return Err(BlobStoreError::EmptyObject);
        }
        if size > self.max_bytes {
            return Err(BlobStoreError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}
