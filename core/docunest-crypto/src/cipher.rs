//! Password encryption using AES-256-CBC.
//!
//! The key is derived once when the [`PasswordCipher`] is built; every
//! encryption draws a fresh random IV.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, DerivedKey, KdfParams, ServerSecret};
use crate::token::{EncryptedToken, IV_SIZE};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypts download passwords into storable tokens and back.
///
/// Build one per process at the composition root and share it behind an
/// `Arc`; construction runs the (slow) key derivation.
#[derive(Debug)]
pub struct PasswordCipher {
    key: DerivedKey,
}

impl PasswordCipher {
    /// Derives the key from `secret` with the production parameters.
    pub fn new(secret: &ServerSecret) -> CryptoResult<Self> {
        Self::with_params(secret, &KdfParams::default())
    }

    /// Derives the key from `secret` with explicit parameters.
    pub fn with_params(secret: &ServerSecret, params: &KdfParams) -> CryptoResult<Self> {
        let key = derive_key(secret, params)?;
        tracing::debug!("password cipher key derived");
        Ok(Self { key })
    }

    /// Creates a cipher from an already derived key.
    pub fn from_key(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypts `plaintext` and returns the `hex(iv):hex(ciphertext)` token.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(self.key.as_bytes().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        EncryptedToken { iv, ciphertext }.encode()
    }

    /// Decrypts a token produced by [`PasswordCipher::encrypt`].
    ///
    /// Fails when the token is malformed, was produced under a different key,
    /// or has been corrupted or truncated. The returned plaintext is zeroized
    /// when dropped.
    pub fn decrypt(&self, token: &str) -> CryptoResult<Zeroizing<String>> {
        let encrypted = EncryptedToken::parse(token)?;

        let plaintext = Aes256CbcDec::new(self.key.as_bytes().into(), &encrypted.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&encrypted.ciphertext)
            .map_err(|_| {
                CryptoError::Decryption("bad padding (wrong key or tampered data)".to_string())
            })?;
        let plaintext = Zeroizing::new(plaintext);

        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))?;
        Ok(Zeroizing::new(text.to_string()))
    }
}
