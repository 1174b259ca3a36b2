//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated, password-based encryption of document text.
//! Every call derives a key from a fresh salt and encrypts under a fresh
//! nonce, so encrypting the same text twice never yields the same envelope.
//! A wrong password or tampered ciphertext fails the GCM tag check and is
//! reported as [`LedgerError::Decryption`], never as garbled plaintext.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{LedgerError, LedgerResult};

use super::envelope::CipherEnvelope;
use super::key_derivation::{derive_key, generate_salt, KeyDerivationParams};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Encrypt plaintext bytes into an envelope
pub fn encrypt(
    plaintext: &[u8],
    password: &str,
    params: &KeyDerivationParams,
) -> LedgerResult<CipherEnvelope> {
    let salt = generate_salt();
    let key = derive_key(password, &salt, params)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LedgerError::Storage(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LedgerError::Storage(format!("Encryption failed: {}", e)))?;

    Ok(CipherEnvelope::new(ciphertext)
        .with_iv(nonce_bytes.to_vec())
        .with_salt(salt.to_vec())
        .with_kdf(*params))
}

/// Decrypt an envelope back into plaintext bytes
pub fn decrypt(envelope: &CipherEnvelope, password: &str) -> LedgerResult<Vec<u8>> {
    let salt = envelope
        .salt
        .as_deref()
        .ok_or_else(|| LedgerError::MalformedEnvelope("Missing salt".to_string()))?;

    let nonce_bytes = envelope
        .iv
        .as_deref()
        .ok_or_else(|| LedgerError::MalformedEnvelope("Missing iv".to_string()))?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(LedgerError::MalformedEnvelope(format!(
            "Invalid iv size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }

    let params = envelope.kdf.unwrap_or_default();
    let key = derive_key(password, salt, &params)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LedgerError::Decryption(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), envelope.ciphertext.as_slice())
        .map_err(|_| {
            LedgerError::Decryption("invalid password or corrupted data".to_string())
        })
}

/// Encrypt a string into envelope JSON text
pub fn encrypt_string(
    plaintext: &str,
    password: &str,
    params: &KeyDerivationParams,
) -> LedgerResult<String> {
    encrypt(plaintext.as_bytes(), password, params)?.stringify()
}

/// Decrypt envelope JSON text to a string
pub fn decrypt_string(text: &str, password: &str) -> LedgerResult<String> {
    let envelope = CipherEnvelope::parse(text)?;
    let plaintext = decrypt(&envelope, password)?;
    String::from_utf8(plaintext)
        .map_err(|e| LedgerError::Decryption(format!("Invalid UTF-8 in decrypted data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KeyDerivationParams {
        KeyDerivationParams::with_costs(64, 1, 1)
    }

    #[test]
    fn test_encrypt_decrypt_string() {
        let plaintext = r#"{"2021": {"entries": {}}}"#;
        let text = encrypt_string(plaintext, "hunter2", &fast()).unwrap();
        assert_eq!(decrypt_string(&text, "hunter2").unwrap(), plaintext);
    }

    #[test]
    fn test_envelope_carries_iv_salt_and_kdf() {
        let envelope = encrypt(b"hello", "pw", &fast()).unwrap();
        assert_eq!(envelope.iv.as_ref().map(Vec::len), Some(NONCE_SIZE));
        assert_eq!(envelope.salt.as_ref().map(Vec::len), Some(16));
        assert_eq!(envelope.kdf, Some(fast()));
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let e1 = encrypt(b"Hello, World!", "pw", &fast()).unwrap();
        let e2 = encrypt(b"Hello, World!", "pw", &fast()).unwrap();

        assert_ne!(e1.iv, e2.iv);
        assert_ne!(e1.salt, e2.salt);
        assert_ne!(e1.ciphertext, e2.ciphertext);
    }

    #[test]
    fn test_wrong_password_fails() {
        let text = encrypt_string("secret ledger", "right", &fast()).unwrap();
        let result = decrypt_string(&text, "wrong");
        assert!(matches!(result, Err(LedgerError::Decryption(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut envelope = encrypt(b"Hello, World!", "pw", &fast()).unwrap();
        envelope.ciphertext[0] ^= 0xFF;

        let result = decrypt(&envelope, "pw");
        assert!(matches!(result, Err(LedgerError::Decryption(_))));
    }

    #[test]
    fn test_missing_salt_is_malformed() {
        let mut envelope = encrypt(b"data", "pw", &fast()).unwrap();
        envelope.salt = None;

        let result = decrypt(&envelope, "pw");
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_bad_nonce_size_is_malformed() {
        let mut envelope = encrypt(b"data", "pw", &fast()).unwrap();
        envelope.iv = Some(vec![0u8; 4]);

        let result = decrypt(&envelope, "pw");
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_oversized_kdf_is_malformed() {
        let text = encrypt_string("data", "pw", &fast()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["kdf"]["m"] = serde_json::json!(u32::MAX);

        let result = decrypt_string(&value.to_string(), "pw");
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_empty_plaintext() {
        let text = encrypt_string("", "pw", &fast()).unwrap();
        assert_eq!(decrypt_string(&text, "pw").unwrap(), "");
    }

    #[test]
    fn test_unicode_plaintext() {
        let plaintext = "Výplata, Potraviny, Kreditka – 1 500 €";
        let text = encrypt_string(plaintext, "heslo", &fast()).unwrap();
        assert_eq!(decrypt_string(&text, "heslo").unwrap(), plaintext);
    }
}
