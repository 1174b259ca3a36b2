//! homebudget - yearly income and expense ledger
//!
//! This library keeps a household budget as one JSON document, optionally
//! password-encrypted, and offers the operations to edit and summarize it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The ledger document (years, entries, months)
//! - `crypto`: Argon2id key derivation and AES-256-GCM envelopes
//! - `storage`: Durable text and JSON files with pluggable encoding
//! - `services`: The `Ledger` that owns and edits an open document
//! - `reports`: Yearly and monthly sums
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use homebudget::models::{Amount, EntryType, MonthId};
//! use homebudget::services::Ledger;
//!
//! # fn main() -> homebudget::error::LedgerResult<()> {
//! let mut ledger = Ledger::open_or_create("budget.json", None)?;
//! ledger.add_year(2021)?;
//! let rent = ledger.add_entry(2021, "Rent", EntryType::Expense)?;
//! ledger.set_month_value(2021, MonthId::Jan, rent, Amount::from_units(400))?;
//! ledger.save()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
