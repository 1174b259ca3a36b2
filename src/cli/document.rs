//! Ledger file CLI commands: init, export, save-as and config

use std::path::{Path, PathBuf};

use clap::Args;

use crate::crypto::{KeyDerivationParams, SecureString};
use crate::error::LedgerResult;
use crate::storage::TextFile;

use super::session::Session;

/// Create the ledger file if it does not exist yet
pub fn init(session: &mut Session) -> LedgerResult<()> {
    let path = session.document_path();
    if path.exists() {
        let ledger = session.open()?;
        println!("Ledger already exists: {}", path.display());
        println!("  Years: {}", ledger.years().len());
        return Ok(());
    }

    let mut ledger = session.open_or_create()?;
    session.save(&mut ledger)?;
    println!("Created ledger: {}", path.display());
    if ledger.is_encrypted() {
        println!("  Encrypted with a password");
    }
    println!();
    println!("Run 'homebudget add-year <YEAR>' to start a year.");
    Ok(())
}

/// Write the document as plain JSON to a file or stdout
pub fn export(session: &mut Session, output: Option<&Path>) -> LedgerResult<()> {
    let ledger = session.open()?;
    let json = ledger.to_json()?;

    match output {
        Some(path) => {
            TextFile::new(path).write(&json)?;
            println!("Exported ledger to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Save the ledger under a new path
pub fn save_as(
    session: &mut Session,
    path: PathBuf,
    new_password: Option<String>,
    plain: bool,
) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let password = if plain {
        None
    } else if let Some(password) = new_password {
        Some(SecureString::from(password))
    } else {
        session.password()?
    };

    session.save_as(&mut ledger, path.clone(), password)?;
    println!("Saved ledger as {}", path.display());
    Ok(())
}

/// Settings that `config` can change
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Currency symbol shown before amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Argon2 memory cost in KiB for new saves
    #[arg(long)]
    pub kdf_memory: Option<u32>,

    /// Argon2 iterations for new saves
    #[arg(long)]
    pub kdf_time: Option<u32>,

    /// Argon2 parallelism for new saves
    #[arg(long)]
    pub kdf_parallelism: Option<u32>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.currency.is_none()
            && self.kdf_memory.is_none()
            && self.kdf_time.is_none()
            && self.kdf_parallelism.is_none()
    }
}

/// Show, and optionally change, the configuration
pub fn config(session: &mut Session, args: ConfigArgs) -> LedgerResult<()> {
    if !args.is_empty() {
        let settings = session.settings_mut();
        if let Some(currency) = args.currency {
            settings.currency_symbol = currency;
        }
        let current = settings.key_derivation;
        let params = KeyDerivationParams::with_costs(
            args.kdf_memory.unwrap_or(current.memory_cost),
            args.kdf_time.unwrap_or(current.time_cost),
            args.kdf_parallelism.unwrap_or(current.parallelism),
        );
        params.validate()?;
        settings.key_derivation = params;
        session.save_settings()?;
    }

    let settings = session.settings();
    println!("homebudget Configuration");
    println!("========================");
    println!("Config directory: {}", session.paths().base_dir().display());
    println!("Settings file:    {}", session.paths().settings_file().display());
    println!("Ledger file:      {}", session.document_path().display());
    println!();
    println!("Settings:");
    match &settings.last_used_path {
        Some(path) => println!("  Last used ledger: {}", path.display()),
        None => println!("  Last used ledger: (none)"),
    }
    println!(
        "  Currency symbol:  {}",
        if settings.currency_symbol.is_empty() {
            "(none)"
        } else {
            settings.currency_symbol.as_str()
        }
    );
    println!(
        "  Key derivation:   Argon2id m={} KiB, t={}, p={}",
        settings.key_derivation.memory_cost,
        settings.key_derivation.time_cost,
        settings.key_derivation.parallelism
    );
    Ok(())
}
