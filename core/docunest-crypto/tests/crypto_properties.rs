//! Property-based tests for the password cipher.
//!
//! These tests verify properties that must always hold:
//! - Encryption is reversible under the same secret
//! - Tokens from another secret never verify
//! - Malformed tokens are rejected without panicking
//! - Every encryption uses a fresh IV

use docunest_crypto::{KdfParams, PasswordCipher, PasswordVerifier, ServerSecret};
use proptest::prelude::*;
use std::sync::{Arc, OnceLock};

// =============================================================================
// HELPERS
// =============================================================================

fn shared_cipher() -> Arc<PasswordCipher> {
    static CIPHER: OnceLock<Arc<PasswordCipher>> = OnceLock::new();
    CIPHER
        .get_or_init(|| {
            let secret = ServerSecret::new("property-test-secret").unwrap();
            Arc::new(PasswordCipher::with_params(&secret, &KdfParams::fast()).unwrap())
        })
        .clone()
}

fn cipher_for(secret: &str) -> PasswordCipher {
    let secret = ServerSecret::new(secret).unwrap();
    PasswordCipher::with_params(&secret, &KdfParams::fast()).unwrap()
}

fn password_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@#$%^&*() ]{0,64}").unwrap()
}

fn secret_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{1,32}").unwrap()
}

// =============================================================================
// CIPHER PROPERTIES
// =============================================================================

mod cipher_properties {
    use super::*;

    proptest! {
        /// decrypt(encrypt(p)) == p under the same secret.
        #[test]
        fn roundtrip_preserves_password(password in any::<String>()) {
            let cipher = shared_cipher();
            let token = cipher.encrypt(&password);
            let decrypted = cipher.decrypt(&token).unwrap();
            prop_assert_eq!(decrypted.as_str(), password.as_str());
        }

        /// Two encryptions of the same password never share a token.
        #[test]
        fn encryption_is_randomized(password in password_strategy()) {
            let cipher = shared_cipher();
            let t1 = cipher.encrypt(&password);
            let t2 = cipher.encrypt(&password);
            prop_assert_ne!(t1, t2);
        }

        /// Tokens never contain the plaintext when it is long enough to be
        /// distinguishable from hex noise.
        #[test]
        fn token_does_not_embed_plaintext(password in "[g-z]{6,32}") {
            let token = shared_cipher().encrypt(&password);
            prop_assert!(!token.contains(&password));
        }

        /// Arbitrary strings never panic the decryptor.
        #[test]
        fn decrypt_never_panics(token in any::<String>()) {
            let _ = shared_cipher().decrypt(&token);
        }
    }
}

// =============================================================================
// VERIFIER PROPERTIES
// =============================================================================

mod verifier_properties {
    use super::*;

    proptest! {
        /// A freshly sealed password always verifies.
        #[test]
        fn sealed_password_verifies(password in password_strategy()) {
            let cipher = shared_cipher();
            let token = cipher.encrypt(&password);
            prop_assert!(PasswordVerifier::new(cipher).verify(&password, &token));
        }

        /// Any other candidate fails.
        #[test]
        fn other_candidates_fail(
            password in password_strategy(),
            candidate in password_strategy(),
        ) {
            prop_assume!(password != candidate);
            let cipher = shared_cipher();
            let token = cipher.encrypt(&password);
            prop_assert!(!PasswordVerifier::new(cipher).verify(&candidate, &token));
        }

        /// Garbage tokens return false.
        #[test]
        fn garbage_tokens_return_false(token in any::<String>(), candidate in password_strategy()) {
            let verifier = PasswordVerifier::new(shared_cipher());
            prop_assert!(!verifier.verify(&candidate, &token));
        }

        /// Hex-shaped tokens without a valid ciphertext return false.
        #[test]
        fn hex_shaped_forgeries_return_false(
            iv in "[0-9a-f]{32}",
            body in "([0-9a-f]{32}){1,3}",
            candidate in password_strategy(),
        ) {
            let verifier = PasswordVerifier::new(shared_cipher());
            let forged = format!("{iv}:{body}");
            let cipher = shared_cipher();
            let expected = cipher
                .decrypt(&forged)
                .map(|p| p.as_str() == candidate)
                .unwrap_or(false);
            prop_assert_eq!(verifier.verify(&candidate, &forged), expected);
        }
    }
}

// =============================================================================
// CROSS-SECRET PROPERTIES (each case derives two keys, so fewer cases)
// =============================================================================

mod cross_secret_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// A token sealed under one secret never verifies under another.
        #[test]
        fn foreign_tokens_never_verify(
            s1 in secret_strategy(),
            s2 in secret_strategy(),
            password in password_strategy(),
        ) {
            prop_assume!(s1 != s2);
            let token = cipher_for(&s1).encrypt(&password);
            let verifier = PasswordVerifier::new(Arc::new(cipher_for(&s2)));
            prop_assert!(!verifier.verify(&password, &token));
        }
    }
}
