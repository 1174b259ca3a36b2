//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger service.

pub mod document;
pub mod entry;
pub mod month;
pub mod report;
pub mod session;

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::{Amount, EntryId, EntryType, MonthId};

pub use document::ConfigArgs;
pub use report::{handle_report_command, ReportCommands};
pub use session::{DocumentOptions, Session, PASSWORD_ENV};

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the ledger file
    Init,

    /// List the years of the ledger
    Years,

    /// Add an empty year
    #[command(name = "add-year")]
    AddYear {
        /// Year (four digits)
        year: i32,
    },

    /// Copy entry definitions from one year into another
    #[command(name = "copy-entries")]
    CopyEntries {
        /// Source year
        from: i32,
        /// Target year
        to: i32,
    },

    /// List the entries of a year
    Entries {
        /// Year
        year: i32,
    },

    /// Add an entry to a year
    #[command(name = "add-entry")]
    AddEntry {
        /// Year
        year: i32,
        /// Entry name (defaults to "New entry")
        name: Option<String>,
        /// Entry type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        entry_type: EntryType,
    },

    /// Rename an entry
    #[command(name = "rename-entry")]
    RenameEntry {
        /// Year
        year: i32,
        /// Entry ID
        id: EntryId,
        /// New name
        name: String,
    },

    /// Set the display order of entries
    Reorder {
        /// Year
        year: i32,
        /// New orders as ID=ORDER pairs
        #[arg(required = true, value_parser = entry::parse_order, allow_hyphen_values = true)]
        orders: Vec<(EntryId, i64)>,
    },

    /// Delete an entry and all of its postings
    #[command(name = "delete-entry")]
    DeleteEntry {
        /// Year
        year: i32,
        /// Entry ID
        id: EntryId,
    },

    /// Show the postings of one month
    Month {
        /// Year
        year: i32,
        /// Month (jan..dec, name or number)
        month: MonthId,
    },

    /// Set an entry's amount for a month
    Set {
        /// Year
        year: i32,
        /// Month (jan..dec, name or number)
        month: MonthId,
        /// Entry ID
        id: EntryId,
        /// Amount (e.g., "1200" or "-15.50")
        #[arg(allow_hyphen_values = true)]
        amount: Amount,
    },

    /// Add to an entry's amount for a month
    Add {
        /// Year
        year: i32,
        /// Month (jan..dec, name or number)
        month: MonthId,
        /// Entry ID
        id: EntryId,
        /// Amount to add (e.g., "12.30" or "-5")
        #[arg(allow_hyphen_values = true)]
        amount: Amount,
    },

    /// Reports over a year
    #[command(subcommand)]
    Report(ReportCommands),

    /// Print the ledger as plain JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save the ledger under a new path
    #[command(name = "save-as")]
    SaveAs {
        /// New ledger file
        path: PathBuf,
        /// Password for the new file (defaults to the current one)
        #[arg(long, conflicts_with = "plain")]
        new_password: Option<String>,
        /// Save the new file unencrypted
        #[arg(long)]
        plain: bool,
    },

    /// Show or change configuration
    Config(ConfigArgs),
}

/// Handle a top-level command
pub fn handle_command(session: &mut Session, cmd: Commands) -> LedgerResult<()> {
    match cmd {
        Commands::Init => document::init(session),
        Commands::Years => entry::list_years(session),
        Commands::AddYear { year } => entry::add_year(session, year),
        Commands::CopyEntries { from, to } => entry::copy_entries(session, from, to),
        Commands::Entries { year } => entry::list_entries(session, year),
        Commands::AddEntry {
            year,
            name,
            entry_type,
        } => entry::add_entry(session, year, name, entry_type),
        Commands::RenameEntry { year, id, name } => entry::rename_entry(session, year, id, &name),
        Commands::Reorder { year, orders } => entry::reorder(session, year, &orders),
        Commands::DeleteEntry { year, id } => entry::delete_entry(session, year, id),
        Commands::Month { year, month } => month::show_month(session, year, month),
        Commands::Set {
            year,
            month,
            id,
            amount,
        } => month::set_value(session, year, month, id, amount),
        Commands::Add {
            year,
            month,
            id,
            amount,
        } => month::add_value(session, year, month, id, amount),
        Commands::Report(cmd) => handle_report_command(session, cmd),
        Commands::Export { output } => document::export(session, output.as_deref()),
        Commands::SaveAs {
            path,
            new_password,
            plain,
        } => document::save_as(session, path, new_password, plain),
        Commands::Config(args) => document::config(session, args),
    }
}
