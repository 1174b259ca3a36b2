//! Cryptographic functions for homebudget
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation and the
//! JSON envelope that carries ciphertext, nonce and salt on disk.

pub mod encryption;
pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, decrypt_string, encrypt, encrypt_string};
pub use envelope::CipherEnvelope;
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use secure_memory::SecureString;
