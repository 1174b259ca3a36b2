//! The ledger document: the persisted root, keyed by year

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::YearRecord;

/// Smallest and largest accepted year
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// All years of the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerDocument(BTreeMap<i32, YearRecord>);

impl LedgerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every year's shape after loading
    pub fn validate(&self) -> Result<(), String> {
        for (year, record) in &self.0 {
            if !YEAR_RANGE.contains(year) {
                return Err(format!("invalid year: {}", year));
            }
            record
                .validate()
                .map_err(|e| format!("year {}: {}", year, e))?;
        }
        Ok(())
    }

    /// Years in ascending order
    pub fn years(&self) -> Vec<i32> {
        self.0.keys().copied().collect()
    }

    pub fn year(&self, year: i32) -> Option<&YearRecord> {
        self.0.get(&year)
    }

    pub fn year_mut(&mut self, year: i32) -> Option<&mut YearRecord> {
        self.0.get_mut(&year)
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.0.contains_key(&year)
    }

    pub fn insert_year(&mut self, year: i32, record: YearRecord) -> Option<YearRecord> {
        self.0.insert(year, record)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
