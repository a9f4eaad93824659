//! Persisted token format.
//!
//! A token is `hex(iv) ":" hex(ciphertext)`: a single separator and two
//! non-empty hex segments. The format is stable; tokens already in the
//! database must keep parsing.

use crate::error::{CryptoError, CryptoResult};

/// Size of the AES-CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// AES block size in bytes. Ciphertext length is always a multiple of it.
pub const BLOCK_SIZE: usize = 16;

/// Separator between the IV and ciphertext segments.
pub const TOKEN_SEPARATOR: char = ':';

/// An IV and ciphertext pair, decoded from or encodable to a token string.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedToken {
    /// The IV used for encryption (unique per token).
    pub iv: [u8; IV_SIZE],
    /// The padded ciphertext.
    pub ciphertext: Vec<u8>,
}

impl EncryptedToken {
    /// Encodes as `hex(iv):hex(ciphertext)`.
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            hex::encode(self.iv),
            TOKEN_SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }

    /// Parses a token string.
    ///
    /// Rejects anything other than exactly two non-empty hex segments, an IV
    /// of [`IV_SIZE`] bytes, and a ciphertext that is a whole number of blocks.
    pub fn parse(token: &str) -> CryptoResult<Self> {
        let parts: Vec<&str> = token.split(TOKEN_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(CryptoError::MalformedToken(format!(
                "expected 2 segments, found {}",
                parts.len()
            )));
        }
        let (iv_hex, ciphertext_hex) = (parts[0], parts[1]);
        if iv_hex.is_empty() || ciphertext_hex.is_empty() {
            return Err(CryptoError::MalformedToken("empty segment".to_string()));
        }

        let iv_bytes = hex::decode(iv_hex)
            .map_err(|e| CryptoError::MalformedToken(format!("iv is not hex: {e}")))?;
        if iv_bytes.len() != IV_SIZE {
            return Err(CryptoError::InvalidIvLength {
                expected: IV_SIZE,
                actual: iv_bytes.len(),
            });
        }

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| CryptoError::MalformedToken(format!("ciphertext is not hex: {e}")))?;
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::MalformedToken(format!(
                "ciphertext length {} is not a multiple of {BLOCK_SIZE}",
                ciphertext.len()
            )));
        }

        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&iv_bytes);
        Ok(Self { iv, ciphertext })
    }
}

impl std::fmt::Debug for EncryptedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedToken")
            .field("iv", &"[REDACTED]")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}
