//! Custom error types for homebudget
//!
//! This module defines the error hierarchy for the ledger and its encrypted
//! document store using thiserror for ergonomic error definitions.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for homebudget operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The document file does not exist (callers may start a new document)
    #[error("File not found: {}", .0.display())]
    FileAbsent(PathBuf),

    /// Unexpected I/O failure while reading or persisting a document
    #[error("Storage error: {0}")]
    Storage(String),

    /// The advisory `.bkp` copy could not be made
    #[error("Backup failed: {0}")]
    BackupFailed(String),

    /// Wrong password or corrupted ciphertext
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// The cipher envelope is not valid JSON or lacks required fields
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The decrypted text is not a valid ledger document
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Save requested for a document that has never been bound to a file
    #[error("No target path: the document has not been saved yet")]
    NoTargetPath,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O errors outside the document store
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors outside the document store
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for ledger mutations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for years
    pub fn year_not_found(year: i32) -> Self {
        Self::NotFound {
            entity_type: "Year",
            identifier: year.to_string(),
        }
    }

    /// Create a "not found" error for entries
    pub fn entry_not_found(year: i32, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: format!("{} in {}", identifier, year),
        }
    }

    /// Wrap an I/O failure on a specific path as a storage error
    pub fn storage(action: &str, path: &Path, err: std::io::Error) -> Self {
        Self::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the document file was missing
    pub fn is_file_absent(&self) -> bool {
        matches!(self, Self::FileAbsent(_))
    }

    /// Check if this is a wrong-password / tampered-data error
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for homebudget operations
pub type LedgerResult<T> = Result<T, LedgerError>;
