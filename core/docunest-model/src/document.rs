use crate::error::{ModelError, ModelResult};
use docunest_types::{DocumentId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may see a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the owner may see the document.
    #[default]
    Private,
    /// Anyone may see metadata and view; download may be password gated.
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }

    #[must_use]
    pub fn from_public_flag(is_public: bool) -> Self {
        if is_public { Self::Public } else { Self::Private }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(ModelError::UnknownVisibility(other.to_string())),
        }
    }
}

/// Download password state.
///
/// `Enabled` holds the ciphertext token produced by the password cipher,
/// never the plaintext. `Debug` does not print the token.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum PasswordProtection {
    #[default]
    Absent,
    Enabled(String),
}

impl PasswordProtection {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Returns the stored token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Enabled(token) => Some(token),
        }
    }

    /// Builds the protection state from a nullable stored column.
    pub fn from_stored(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self::Enabled(t),
            _ => Self::Absent,
        }
    }
}

impl fmt::Debug for PasswordProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Enabled(_) => f.write_str("Enabled([REDACTED])"),
        }
    }
}

/// Display fields, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub description: Option<String>,
    /// Original file name as uploaded.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub owner_id: UserId,
    pub visibility: Visibility,
    pub password_protection: PasswordProtection,
    /// Opaque reference to the stored bytes, owned by the storage provider.
    pub resource_locator: String,
    pub metadata: DocumentMetadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DocumentRecord {
    /// Creates a freshly uploaded record: private, no password.
    pub fn new(
        owner_id: UserId,
        resource_locator: impl Into<String>,
        metadata: DocumentMetadata,
    ) -> ModelResult<Self> {
        let now = Timestamp::now();
        let record = Self {
            id: DocumentId::new(),
            owner_id,
            visibility: Visibility::Private,
            password_protection: PasswordProtection::Absent,
            resource_locator: resource_locator.into(),
            metadata,
            created_at: now,
            updated_at: now,
        };
        record.validate()?;
        Ok(record)
    }

    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    #[must_use]
    pub fn password_enabled(&self) -> bool {
        self.password_protection.is_enabled()
    }

    /// Checks the record invariants.
    pub fn validate(&self) -> ModelResult<()> {
        if self.metadata.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if self.metadata.file_name.is_empty() {
            return Err(ModelError::EmptyFileName);
        }
        if self.resource_locator.is_empty() {
            return Err(ModelError::EmptyLocator);
        }
        if let PasswordProtection::Enabled(token) = &self.password_protection {
            if token.is_empty() {
                return Err(ModelError::EmptyToken);
            }
        }
        Ok(())
    }
}
