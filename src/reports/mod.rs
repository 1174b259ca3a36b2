//! Reports for homebudget
//!
//! Derived, read-only views over a ledger document.

pub mod monthly;
pub mod year_summary;

pub use monthly::MonthSums;
pub use year_summary::{EntrySum, YearSummary};
