//! Access control for DocuNest documents.
//!
//! Two entry points share the same collaborators:
//!
//! - [`AccessEngine`]: the read path. Given a caller, a document id, an
//!   [`Operation`] and an optional download password, it returns a typed
//!   [`Decision`]. Denials are values; only infrastructure failures are
//!   errors.
//! - [`DocumentService`]: the owner write path (upload, visibility and
//!   password settings, delete, listing).
//!
//! Unknown documents and private documents the caller does not own produce
//! the same [`Denial::NotFound`], so a caller cannot probe for existence.

mod decision;
mod engine;
mod error;
mod identity;
mod policy;
mod service;

pub use decision::{Decision, Denial, Grant, Operation};
pub use engine::AccessEngine;
pub use error::{AccessError, AccessResult};
pub use identity::{Caller, IdentityProvider};
pub use service::{DocumentService, NewUpload, PasswordSetting};
