//! User settings for homebudget
//!
//! Remembers the last ledger file used and the Argon2 costs applied when
//! encrypting new saves.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::crypto::KeyDerivationParams;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::JsonFile;

/// User settings for homebudget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ledger file most recently opened or saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_path: Option<PathBuf>,

    /// Argon2 costs for encrypting new saves
    #[serde(default)]
    pub key_derivation: KeyDerivationParams,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    String::new()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            last_used_path: None,
            key_derivation: KeyDerivationParams::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written until [`Settings::save`] is called.
    pub fn load_or_create(paths: &BudgetPaths) -> LedgerResult<Self> {
        let store = JsonFile::<Settings>::new(paths.settings_file());
        match store.read() {
            Ok(settings) => Ok(settings.unwrap_or_default()),
            Err(LedgerError::MalformedDocument(e)) => Err(LedgerError::Config(format!(
                "Failed to parse settings file: {}",
                e
            ))),
            Err(e) => Err(e),
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        JsonFile::<Settings>::new(paths.settings_file()).write(self)?;
        Ok(())
    }

    /// Record `path` as the last used ledger
    ///
    /// Returns true when the value changed.
    pub fn remember_path(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.last_used_path.as_ref() == Some(&path) {
            return false;
        }
        self.last_used_path = Some(path);
        true
    }
}
