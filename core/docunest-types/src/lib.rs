//! Core type definitions for DocuNest.
//!
//! This crate defines the small, dependency-light types shared by every
//! other DocuNest crate:
//! - Document identifiers (UUID v7) and user identifiers (opaque strings
//!   issued by the identity provider)
//! - Millisecond wall-clock timestamps for record bookkeeping

mod ids;
mod timestamp;

pub use ids::{DocumentId, UserId, MAX_USER_ID_LEN};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}
