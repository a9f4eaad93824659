//! Decision values returned by the access engine.

use docunest_model::DocumentSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller wants to do with a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read the display metadata.
    Metadata,
    /// Render the document inline.
    View,
    /// Download the file.
    Download,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Metadata => "metadata",
            Operation::View => "view",
            Operation::Download => "download",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permitted operation.
///
/// View and download grants carry the resolved resource locator; a
/// metadata grant never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    Metadata {
        summary: DocumentSummary,
    },
    /// Granted without a password even when the document is protected; the
    /// password gates only [`Operation::Download`]. The locator stays
    /// fetchable by whoever holds it.
    View {
        summary: DocumentSummary,
        locator: String,
    },
    Download {
        summary: DocumentSummary,
        locator: String,
    },
}

impl Grant {
    pub fn summary(&self) -> &DocumentSummary {
        match self {
            Grant::Metadata { summary }
            | Grant::View { summary, .. }
            | Grant::Download { summary, .. } => summary,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        match self {
            Grant::Metadata { .. } => None,
            Grant::View { locator, .. } | Grant::Download { locator, .. } => Some(locator),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Grant::Metadata { .. } => Operation::Metadata,
            Grant::View { .. } => Operation::View,
            Grant::Download { .. } => Operation::Download,
        }
    }
}

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denial {
    /// The document does not exist or is private to someone else.
    NotFound,
    /// A protected download was attempted without a password.
    PasswordRequired,
    /// The supplied download password did not verify.
    InvalidPassword,
}

impl Denial {
    pub fn as_str(&self) -> &'static str {
        match self {
            Denial::NotFound => "not_found",
            Denial::PasswordRequired => "password_required",
            Denial::InvalidPassword => "invalid_password",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Grant),
    Deny(Denial),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    pub fn grant(&self) -> Option<&Grant> {
        match self {
            Decision::Allow(grant) => Some(grant),
            Decision::Deny(_) => None,
        }
    }

    pub fn denial(&self) -> Option<Denial> {
        match self {
            Decision::Allow(_) => None,
            Decision::Deny(denial) => Some(*denial),
        }
    }
}
