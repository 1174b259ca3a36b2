//! Text encoders applied between the document text and the bytes on disk
//!
//! A store is built with exactly one encoder. [`IdentityEncoder`] stores
//! plaintext and is the default; [`PasswordEncoder`] wraps the text in an
//! encrypted envelope.

use crate::crypto::{decrypt_string, encrypt_string, KeyDerivationParams, SecureString};
use crate::error::LedgerResult;

/// Encode/decode capability used by [`TextFile`](super::TextFile)
pub trait TextEncoder: Send + Sync {
    /// Transform document text into the form written to disk
    fn encode(&self, text: &str) -> LedgerResult<String>;

    /// Recover document text from its on-disk form
    fn decode(&self, data: &str) -> LedgerResult<String>;
}

/// Pass-through encoder for unencrypted documents
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEncoder;

impl TextEncoder for IdentityEncoder {
    fn encode(&self, text: &str) -> LedgerResult<String> {
        Ok(text.to_string())
    }

    fn decode(&self, data: &str) -> LedgerResult<String> {
        Ok(data.to_string())
    }
}

/// Password-based AES-256-GCM encoder
#[derive(Debug, Clone)]
pub struct PasswordEncoder {
    password: SecureString,
    params: KeyDerivationParams,
}

impl PasswordEncoder {
    /// Create an encoder with the default Argon2 costs
    pub fn new(password: impl Into<SecureString>) -> Self {
        Self::with_params(password, KeyDerivationParams::default())
    }

    /// Create an encoder that derives keys for new saves with `params`
    ///
    /// Decoding always uses the costs recorded in the envelope.
    pub fn with_params(password: impl Into<SecureString>, params: KeyDerivationParams) -> Self {
        Self {
            password: password.into(),
            params,
        }
    }

    pub fn params(&self) -> &KeyDerivationParams {
        &self.params
    }
}

impl TextEncoder for PasswordEncoder {
    fn encode(&self, text: &str) -> LedgerResult<String> {
        encrypt_string(text, &self.password, &self.params)
    }

    fn decode(&self, data: &str) -> LedgerResult<String> {
        decrypt_string(data, &self.password)
    }
}
