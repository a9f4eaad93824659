//! Verification of caller-supplied download passwords.

use crate::cipher::PasswordCipher;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Checks candidate passwords against stored tokens.
///
/// This is the only component in the request path that decrypts a stored
/// token. It never logs or returns the candidate or the recovered plaintext.
#[derive(Debug, Clone)]
pub struct PasswordVerifier {
    cipher: Arc<PasswordCipher>,
}

impl PasswordVerifier {
    pub fn new(cipher: Arc<PasswordCipher>) -> Self {
        Self { cipher }
    }

    /// Returns true if `candidate` is the password sealed in `stored_token`.
    ///
    /// A malformed or undecryptable token is a verification failure, not an
    /// error.
    pub fn verify(&self, candidate: &str, stored_token: &str) -> bool {
        match self.cipher.decrypt(stored_token) {
            Ok(recovered) => candidate.as_bytes().ct_eq(recovered.as_bytes()).into(),
            Err(e) => {
                tracing::warn!(malformed = e.is_malformed(), "stored password token rejected");
                false
            }
        }
    }
}
