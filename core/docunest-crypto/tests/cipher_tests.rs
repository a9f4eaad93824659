use docunest_crypto::{EncryptedToken, KdfParams, PasswordCipher, ServerSecret, BLOCK_SIZE, IV_SIZE};

fn cipher(secret: &str) -> PasswordCipher {
    let secret = ServerSecret::new(secret).unwrap();
    PasswordCipher::with_params(&secret, &KdfParams::fast()).unwrap()
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let c = cipher("process-secret");
    let token = c.encrypt("hunter2");
    let decrypted = c.decrypt(&token).unwrap();
    assert_eq!(decrypted.as_str(), "hunter2");
}

#[test]
fn encrypt_decrypt_empty_plaintext() {
    let c = cipher("process-secret");
    let token = c.encrypt("");
    assert_eq!(c.decrypt(&token).unwrap().as_str(), "");
}

#[test]
fn encrypt_decrypt_unicode() {
    let c = cipher("process-secret");
    let token = c.encrypt("pässwörd-密码-🔒");
    assert_eq!(c.decrypt(&token).unwrap().as_str(), "pässwörd-密码-🔒");
}

#[test]
fn token_has_hex_iv_and_block_aligned_ciphertext() {
    let c = cipher("process-secret");
    let token = c.encrypt("hunter2");
    let (iv, ct) = token.split_once(':').unwrap();
    assert_eq!(iv.len(), IV_SIZE * 2);
    assert!(iv.chars().all(|ch| ch.is_ascii_hexdigit()));
    assert!(!ct.is_empty());
    assert_eq!((ct.len() / 2) % BLOCK_SIZE, 0);
    assert!(!token.contains("hunter2"));
}

#[test]
fn short_plaintext_pads_to_one_block() {
    let c = cipher("process-secret");
    let token = c.encrypt("abc");
    let parsed = EncryptedToken::parse(&token).unwrap();
    assert_eq!(parsed.ciphertext.len(), BLOCK_SIZE);
}

#[test]
fn full_block_plaintext_gets_extra_padding_block() {
    let c = cipher("process-secret");
    let token = c.encrypt("0123456789abcdef");
    let parsed = EncryptedToken::parse(&token).unwrap();
    assert_eq!(parsed.ciphertext.len(), 2 * BLOCK_SIZE);
}

#[test]
fn same_plaintext_produces_different_tokens() {
    let c = cipher("process-secret");
    let t1 = c.encrypt("same");
    let t2 = c.encrypt("same");
    assert_ne!(t1, t2);
    assert_eq!(c.decrypt(&t1).unwrap().as_str(), "same");
    assert_eq!(c.decrypt(&t2).unwrap().as_str(), "same");
}

#[test]
fn same_secret_derives_same_key() {
    let a = cipher("shared");
    let b = cipher("shared");
    let token = a.encrypt("portable");
    assert_eq!(b.decrypt(&token).unwrap().as_str(), "portable");
}

#[test]
fn wrong_secret_fails_or_yields_different_plaintext() {
    let a = cipher("secret-a");
    let b = cipher("secret-b");
    let token = a.encrypt("confidential");
    match b.decrypt(&token) {
        Ok(recovered) => assert_ne!(recovered.as_str(), "confidential"),
        Err(_) => {}
    }
}

#[test]
fn truncated_ciphertext_fails() {
    let c = cipher("process-secret");
    let token = c.encrypt("a fairly long password that spans blocks");
    let truncated = &token[..token.len() - 2];
    assert!(c.decrypt(truncated).is_err());
}

#[test]
fn dropped_final_block_fails_or_differs() {
    let c = cipher("process-secret");
    let token = c.encrypt("a fairly long password that spans blocks");
    let truncated = &token[..token.len() - BLOCK_SIZE * 2];
    match c.decrypt(truncated) {
        Ok(recovered) => assert_ne!(recovered.as_str(), "a fairly long password that spans blocks"),
        Err(_) => {}
    }
}

#[test]
fn decrypt_rejects_missing_separator() {
    let c = cipher("process-secret");
    let err = c.decrypt("00112233445566778899aabbccddeeff").unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn decrypt_rejects_extra_separator() {
    let c = cipher("process-secret");
    let token = c.encrypt("pw");
    let err = c.decrypt(&format!("{token}:00")).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn decrypt_rejects_non_hex() {
    let c = cipher("process-secret");
    assert!(c.decrypt("zz:yy").unwrap_err().is_malformed());
}

#[test]
fn decrypt_rejects_plaintext_looking_value() {
    let c = cipher("process-secret");
    assert!(c.decrypt("hunter2").is_err());
}

#[test]
fn cipher_debug_redacts_key() {
    let c = cipher("process-secret");
    let debug = format!("{c:?}");
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains("process-secret"));
}
