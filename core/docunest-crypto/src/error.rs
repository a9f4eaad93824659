//! Error types for the password cipher.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
///
/// None of these variants carry plaintext, key material or token contents.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The process secret was empty.
    #[error("encryption secret must not be empty")]
    EmptySecret,

    /// Key derivation failed (invalid parameters).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The stored token does not match `<hex iv>:<hex ciphertext>`.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Invalid IV length inside an otherwise well-formed token.
    #[error("invalid iv length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// Decryption failed (wrong key, corrupted or truncated ciphertext).
    #[error("decryption failed: {0}")]
    Decryption(String),
}

impl CryptoError {
    /// Returns true if the error comes from the shape of the token rather
    /// than from the decryption itself.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CryptoError::MalformedToken(_) | CryptoError::InvalidIvLength { .. }
        )
    }
}
