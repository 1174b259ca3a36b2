//! Cipher envelope codec
//!
//! The on-disk form of an encrypted document is a small JSON object:
//!
//! ```json
//! { "ct": "<base64 ciphertext>", "iv": "<hex nonce>", "s": "<hex salt>" }
//! ```
//!
//! `iv` and `s` are only written when the cipher produced them, and their
//! absence on read means "not used". An optional `kdf` object records the
//! Argon2 costs the key was derived with.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::KeyDerivationParams;

/// Decoded envelope contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope {
    pub ciphertext: Vec<u8>,
    pub iv: Option<Vec<u8>>,
    pub salt: Option<Vec<u8>>,
    pub kdf: Option<KeyDerivationParams>,
}

/// JSON shape of the envelope
#[derive(Serialize, Deserialize)]
struct EnvelopeJson {
    ct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kdf: Option<KeyDerivationParams>,
}

impl CipherEnvelope {
    /// Create an envelope holding only ciphertext
    pub fn new(ciphertext: impl Into<Vec<u8>>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            iv: None,
            salt: None,
            kdf: None,
        }
    }

    pub fn with_iv(mut self, iv: impl Into<Vec<u8>>) -> Self {
        self.iv = Some(iv.into());
        self
    }

    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn with_kdf(mut self, kdf: KeyDerivationParams) -> Self {
        self.kdf = Some(kdf);
        self
    }

    /// Serialize to pretty-printed JSON
    ///
    /// Empty `iv`/`salt` values are omitted rather than written as "".
    pub fn stringify(&self) -> LedgerResult<String> {
        let json = EnvelopeJson {
            ct: STANDARD.encode(&self.ciphertext),
            iv: non_empty_hex(self.iv.as_deref()),
            s: non_empty_hex(self.salt.as_deref()),
            kdf: self.kdf,
        };

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Parse an envelope from its JSON text
    ///
    /// A `kdf` object with zero or out-of-bounds costs is rejected here,
    /// before any key derivation runs.
    pub fn parse(text: &str) -> LedgerResult<Self> {
        let json: EnvelopeJson = serde_json::from_str(text)
            .map_err(|e| LedgerError::MalformedEnvelope(format!("Invalid envelope JSON: {}", e)))?;

        let ciphertext = STANDARD.decode(json.ct.as_bytes()).map_err(|e| {
            LedgerError::MalformedEnvelope(format!("Invalid ciphertext encoding: {}", e))
        })?;

        if let Some(kdf) = &json.kdf {
            kdf.validate().map_err(|e| {
                LedgerError::MalformedEnvelope(format!("Invalid kdf parameters: {}", e))
            })?;
        }

        Ok(Self {
            ciphertext,
            iv: decode_hex_field("iv", json.iv)?,
            salt: decode_hex_field("s", json.s)?,
            kdf: json.kdf,
        })
    }
}

fn non_empty_hex(bytes: Option<&[u8]>) -> Option<String> {
    bytes.filter(|b| !b.is_empty()).map(hex::encode)
}

fn decode_hex_field(name: &str, value: Option<String>) -> LedgerResult<Option<Vec<u8>>> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => hex::decode(&s).map(Some).map_err(|e| {
            LedgerError::MalformedEnvelope(format!("Invalid {} encoding: {}", name, e))
        }),
    }
}
