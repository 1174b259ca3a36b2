//! Entry model
//!
//! An entry is a named income or expense line of a year, such as "Salary"
//! or "Rent". Months post amounts against entries by id.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Whether an entry brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Report position: all expenses come before all incomes
    pub fn report_rank(self) -> u8 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("income"),
            Self::Expense => f.pad("expense"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Invalid entry type: {} (expected income or expense)", other)),
        }
    }
}

/// A named income/expense line with its display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Sort key within the entry's type, lower first
    pub order: i64,
}

impl Entry {
    /// Name given to entries created without one
    pub const DEFAULT_NAME: &'static str = "New entry";

    pub fn new(name: impl Into<String>, entry_type: EntryType, order: i64) -> Self {
        Self {
            name: name.into(),
            entry_type,
            order,
        }
    }

    pub fn income(name: impl Into<String>, order: i64) -> Self {
        Self::new(name, EntryType::Income, order)
    }

    pub fn expense(name: impl Into<String>, order: i64) -> Self {
        Self::new(name, EntryType::Expense, order)
    }

    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// Type-then-order comparison used by every report
    pub fn report_cmp(&self, other: &Entry) -> Ordering {
        self.entry_type
            .report_rank()
            .cmp(&other.entry_type.report_rank())
            .then(self.order.cmp(&other.order))
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.name.trim().is_empty() {
            return Err(EntryValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyName,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Entry name cannot be empty"),
        }
    }
}

impl std::error::Error for EntryValidationError {}
