//! Document model for DocuNest.
//!
//! Defines the persisted document record and the views derived from it:
//! - [`DocumentRecord`]: the stored entity (owner, visibility, protection,
//!   resource locator, display metadata, timestamps)
//! - [`Visibility`] / [`PasswordProtection`]: the two independently toggled
//!   access settings
//! - [`DocumentSummary`] / [`OwnerDocumentView`]: serializable projections
//!   that never carry the stored password token
//!
//! The record itself is not `Serialize`; anything leaving the
//! process goes through a view.

mod document;
mod error;
mod view;

pub use document::{DocumentMetadata, DocumentRecord, PasswordProtection, Visibility};
pub use error::{ModelError, ModelResult};
pub use view::{DocumentSummary, OwnerDocumentView};
