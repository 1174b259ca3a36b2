//! Path management for homebudget
//!
//! ## Path Resolution Order
//!
//! 1. `HOMEBUDGET_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (e.g. `~/.config/homebudget` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "HOMEBUDGET_CONFIG_DIR";

/// Manages all paths used by homebudget
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve paths from the environment, falling back to the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> LedgerResult<Self> {
        Self::resolve(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
    }

    /// Resolve paths from an explicit override, or the platform default
    pub fn resolve(override_dir: Option<PathBuf>) -> LedgerResult<Self> {
        let base_dir = match override_dir.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "homebudget")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerError::Config("Could not determine the home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ledger used when no file is given and none was used before
    pub fn default_document(&self) -> PathBuf {
        self.base_dir.join("budget.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if settings have been written before
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
