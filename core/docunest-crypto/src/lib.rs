//! Download-password protection for DocuNest.
//!
//! Owners may gate downloads of a shared document behind a password. The
//! password is never stored in the clear: it is encrypted under a key derived
//! once from the process-wide secret and persisted as a token of the form
//! `hex(iv):hex(ciphertext)`.
//!
//! - [`key`]: secret handling and scrypt key derivation
//! - [`token`]: the persisted token format
//! - [`cipher`]: AES-256-CBC encryption of passwords into tokens
//! - [`verifier`]: decrypt-and-compare verification of caller-supplied passwords
//!
//! Verification decrypts the stored token and compares. Tokens written by
//! earlier deployments must keep verifying, so the format and KDF parameters
//! are fixed.

pub mod cipher;
pub mod error;
pub mod key;
pub mod token;
pub mod verifier;

pub use cipher::PasswordCipher;
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KdfParams, ServerSecret, KEY_SIZE, LEGACY_SALT};
pub use token::{EncryptedToken, BLOCK_SIZE, IV_SIZE, TOKEN_SEPARATOR};
pub use verifier::PasswordVerifier;
