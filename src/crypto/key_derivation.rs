//! Key derivation using Argon2id
//!
//! Derives the AES-256 document key from the user's password and a per-save
//! random salt. The cost parameters travel with the ciphertext envelope so a
//! document stays readable if the configured costs change later.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LedgerError, LedgerResult};

/// Salt size in bytes
pub const SALT_SIZE: usize = 16;

/// Derived key size in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Largest accepted memory cost in KiB (1 GiB)
pub const MAX_MEMORY_COST: u32 = 1 << 20;

/// Largest accepted iteration count
pub const MAX_TIME_COST: u32 = 64;

/// Largest accepted parallelism
pub const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    #[serde(rename = "m", alias = "memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations, default: 3)
    #[serde(rename = "t", alias = "time_cost")]
    pub time_cost: u32,
    /// Parallelism degree (default: 4)
    #[serde(rename = "p", alias = "parallelism")]
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KeyDerivationParams {
    /// Create params with specific costs
    pub fn with_costs(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Check that Argon2 accepts these costs and that they stay within bounds
    pub fn validate(&self) -> LedgerResult<()> {
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(self) -> LedgerResult<Argon2<'static>> {
        if self.memory_cost > MAX_MEMORY_COST
            || self.time_cost > MAX_TIME_COST
            || self.parallelism > MAX_PARALLELISM
        {
            return Err(LedgerError::Config(format!(
                "Argon2 costs too high: m={} t={} p={} (max m={} t={} p={})",
                self.memory_cost,
                self.time_cost,
                self.parallelism,
                MAX_MEMORY_COST,
                MAX_TIME_COST,
                MAX_PARALLELISM
            )));
        }

        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_SIZE),
        )
        .map_err(|e| LedgerError::Config(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// A derived encryption key, wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive an encryption key from a password and salt
pub fn derive_key(
    password: &str,
    salt: &[u8],
    params: &KeyDerivationParams,
) -> LedgerResult<DerivedKey> {
    let argon2 = params.to_argon2()?;

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| LedgerError::Decryption(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KeyDerivationParams {
        KeyDerivationParams::with_costs(64, 1, 1)
    }

    #[test]
    fn test_validate() {
        assert!(fast().validate().is_ok());
        assert!(KeyDerivationParams::default().validate().is_ok());
        assert!(KeyDerivationParams::with_costs(64, 0, 1).validate().is_err());
    }

    #[test]
    fn test_validate_caps_costs() {
        let at_limit = KeyDerivationParams::with_costs(MAX_MEMORY_COST, MAX_TIME_COST, 1);
        assert!(at_limit.validate().is_ok());

        for params in [
            KeyDerivationParams::with_costs(u32::MAX, 1, 1),
            KeyDerivationParams::with_costs(64, MAX_TIME_COST + 1, 1),
            KeyDerivationParams::with_costs(1024, 1, MAX_PARALLELISM + 1),
        ] {
            assert!(matches!(params.validate(), Err(LedgerError::Config(_))));
        }
    }

    #[test]
    fn test_derive_key() {
        let salt = generate_salt();
        let key = derive_key("test_password", &salt, &fast()).unwrap();
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_same_password_same_key() {
        let salt = generate_salt();
        let key1 = derive_key("test_password", &salt, &fast()).unwrap();
        let key2 = derive_key("test_password", &salt, &fast()).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = generate_salt();
        let key1 = derive_key("password1", &salt, &fast()).unwrap();
        let key2 = derive_key("password2", &salt, &fast()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same", &generate_salt(), &fast()).unwrap();
        let key2 = derive_key("same", &generate_salt(), &fast()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key("password", &[1, 2, 3], &fast());
        assert!(matches!(result, Err(LedgerError::Decryption(_))));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = KeyDerivationParams::with_costs(1, 0, 0);
        let result = derive_key("password", &generate_salt(), &params);
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_params_serialize_compactly() {
        let json = serde_json::to_string(&KeyDerivationParams::default()).unwrap();
        assert_eq!(json, r#"{"m":65536,"t":3,"p":4}"#);

        let long: KeyDerivationParams =
            serde_json::from_str(r#"{"memory_cost":64,"time_cost":1,"parallelism":1}"#).unwrap();
        assert_eq!(long, fast());
    }
}
