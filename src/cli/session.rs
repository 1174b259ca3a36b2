//! Command session
//!
//! Resolves which ledger file a command works on and with which password,
//! opens it, and saves it back while keeping the settings' last used path
//! current.

use std::path::PathBuf;

use clap::Args;

use crate::config::{BudgetPaths, Settings};
use crate::crypto::SecureString;
use crate::error::{LedgerError, LedgerResult};
use crate::services::Ledger;

/// Environment variable supplying the ledger password
pub const PASSWORD_ENV: &str = "HOMEBUDGET_PASSWORD";

/// Options selecting the ledger file and how it is protected
#[derive(Args, Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Ledger file (defaults to the last used file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Password for an encrypted ledger
    #[arg(
        long,
        global = true,
        env = PASSWORD_ENV,
        hide_env_values = true,
        conflicts_with = "no_password"
    )]
    pub password: Option<String>,

    /// Store the ledger unencrypted and never prompt for a password
    #[arg(long, global = true)]
    pub no_password: bool,
}

/// State shared by all command handlers
pub struct Session {
    paths: BudgetPaths,
    settings: Settings,
    options: DocumentOptions,
    password: Option<Option<SecureString>>,
}

impl Session {
    pub fn new(paths: BudgetPaths, settings: Settings, options: DocumentOptions) -> Self {
        Self {
            paths,
            settings,
            options,
            password: None,
        }
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Currency symbol for printed amounts
    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// The ledger file this session works on
    pub fn document_path(&self) -> PathBuf {
        self.options
            .file
            .clone()
            .or_else(|| self.settings.last_used_path.clone())
            .unwrap_or_else(|| self.paths.default_document())
    }

    /// The password for the ledger, prompting once if none was given
    ///
    /// An empty answer to the prompt selects plaintext storage.
    pub fn password(&mut self) -> LedgerResult<Option<SecureString>> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        let password = if self.options.no_password {
            None
        } else if let Some(password) = &self.options.password {
            Some(SecureString::from(password.as_str()))
        } else {
            let answer = rpassword::prompt_password("Password (empty for none): ")
                .map_err(|e| LedgerError::Config(format!("Failed to read password: {}", e)))?;
            Some(SecureString::from(answer)).filter(|p| !p.is_empty())
        };

        self.password = Some(password.clone());
        Ok(password)
    }

    /// Open the session's ledger; the file must exist
    pub fn open(&mut self) -> LedgerResult<Ledger> {
        let path = self.document_path();
        let password = self.password()?;
        let ledger =
            Ledger::open(&path, password)?.with_key_derivation(self.settings.key_derivation);
        self.remember(path)?;
        Ok(ledger)
    }

    /// Open the session's ledger, starting an empty one if the file is absent
    pub fn open_or_create(&mut self) -> LedgerResult<Ledger> {
        let path = self.document_path();
        let password = self.password()?;
        Ok(Ledger::open_or_create(&path, password)?
            .with_key_derivation(self.settings.key_derivation))
    }

    /// Save the ledger to its bound file
    pub fn save(&mut self, ledger: &mut Ledger) -> LedgerResult<()> {
        let outcome = ledger.save()?;
        if let Some(e) = outcome.backup_error {
            eprintln!("Warning: {}", e);
        }
        if let Some(path) = ledger.path() {
            self.remember(path.to_path_buf())?;
        }
        Ok(())
    }

    /// Save the ledger to a new file and make it the last used one
    pub fn save_as(
        &mut self,
        ledger: &mut Ledger,
        path: PathBuf,
        password: Option<SecureString>,
    ) -> LedgerResult<()> {
        let outcome = ledger.save_as(&path, password.clone())?;
        if let Some(e) = outcome.backup_error {
            eprintln!("Warning: {}", e);
        }
        self.options.file = Some(path.clone());
        self.password = Some(password);
        self.remember(path)
    }

    /// Persist the settings
    pub fn save_settings(&self) -> LedgerResult<()> {
        self.settings.save(&self.paths)
    }

    fn remember(&mut self, path: PathBuf) -> LedgerResult<()> {
        let path = std::path::absolute(&path).unwrap_or(path);
        if self.settings.remember_path(path) {
            self.save_settings()?;
        }
        Ok(())
    }
}
