//! Service layer for homebudget
//!
//! The service layer owns the open ledger document and applies every
//! mutation to it, leaving persistence to an explicit save.

pub mod ledger;

pub use ledger::Ledger;
