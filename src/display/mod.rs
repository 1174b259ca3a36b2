//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display.

pub mod entry;
pub mod month;

pub use entry::{format_entry_details, format_entry_list, format_year_list};
pub use month::format_month;
