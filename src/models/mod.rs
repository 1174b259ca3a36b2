//! Core data models for homebudget
//!
//! The ledger document maps years to year records; each year holds its
//! entries (income/expense lines) and twelve months of postings against
//! those entries.

pub mod amount;
pub mod document;
pub mod entry;
pub mod ids;
pub mod month;
pub mod year;

pub use amount::{Amount, AmountParseError};
pub use document::{LedgerDocument, YEAR_RANGE};
pub use entry::{Entry, EntryType, EntryValidationError};
pub use ids::EntryId;
pub use month::{MonthId, MonthRecord};
pub use year::{YearEntries, YearRecord};
