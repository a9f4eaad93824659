//! Secret handling and key derivation.
//!
//! The cipher key is derived from the process-wide secret with scrypt. The
//! salt and cost parameters are fixed so that the same secret always yields
//! the same key; existing tokens depend on this.

use crate::error::{CryptoError, CryptoResult};
use scrypt::Params;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of the derived key in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Salt used for deriving the cipher key from the secret.
///
/// Fixed for compatibility with tokens written by earlier deployments.
pub const LEGACY_SALT: &[u8] = b"salt";

/// The operational secret the cipher key is derived from.
///
/// Loaded once at startup. The value is zeroized on drop and never shown by
/// `Debug`.
#[derive(Clone)]
pub struct ServerSecret(Zeroizing<String>);

impl ServerSecret {
    /// Wraps a secret, rejecting empty values.
    pub fn new(secret: impl Into<String>) -> CryptoResult<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(CryptoError::EmptySecret);
        }
        Ok(Self(secret))
    }

    fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for ServerSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ServerSecret").field(&"[REDACTED]").finish()
    }
}

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a derived key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// scrypt cost parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost `N`.
    pub log_n: u8,
    /// Block size `r`.
    pub r: u32,
    /// Parallelism `p`.
    pub p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // N = 16384, r = 8, p = 1. Changing these invalidates stored tokens.
        Self {
            log_n: 14,
            r: 8,
            p: 1,
        }
    }
}

impl KdfParams {
    /// Cheap parameters for tests. Keys derived with these are not
    /// interchangeable with production keys.
    pub fn fast() -> Self {
        Self {
            log_n: 4,
            r: 8,
            p: 1,
        }
    }
}

/// Derives the cipher key from the server secret.
///
/// This is slow; callers derive once and keep the resulting
/// [`crate::PasswordCipher`] for the lifetime of the process.
pub fn derive_key(secret: &ServerSecret, params: &KdfParams) -> CryptoResult<DerivedKey> {
    let scrypt_params = Params::new(params.log_n, params.r, params.p, KEY_SIZE)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let mut key_bytes = [0u8; KEY_SIZE];
    scrypt::scrypt(secret.expose(), LEGACY_SALT, &scrypt_params, &mut key_bytes)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let key = DerivedKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}
