//! Year record: one year's entries and twelve months of postings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Amount, Entry, EntryId, MonthId, MonthRecord};

static EMPTY_MONTH: MonthRecord = MonthRecord::new();

/// Entries of a year keyed by id
pub type YearEntries = BTreeMap<EntryId, Entry>;

/// One year of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    pub entries: YearEntries,
    months: BTreeMap<MonthId, MonthRecord>,
}

impl Default for YearRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl YearRecord {
    /// An empty year with all twelve months present
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            months: MonthId::ALL
                .into_iter()
                .map(|m| (m, MonthRecord::new()))
                .collect(),
        }
    }

    /// Check the invariants a loaded year must satisfy
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<_> = MonthId::ALL
            .into_iter()
            .filter(|m| !self.months.contains_key(m))
            .map(MonthId::code)
            .collect();
        if !missing.is_empty() {
            return Err(format!("missing months: {}", missing.join(", ")));
        }

        for (id, entry) in &self.entries {
            entry
                .validate()
                .map_err(|e| format!("entry {}: {}", id, e))?;
        }

        Ok(())
    }

    /// Id the next new entry will receive, `None` when ids are exhausted
    pub fn next_entry_id(&self) -> Option<EntryId> {
        EntryId::next_after(self.entries.keys().copied())
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Postings of `month`
    pub fn month(&self, month: MonthId) -> &MonthRecord {
        self.months.get(&month).unwrap_or(&EMPTY_MONTH)
    }

    pub fn month_mut(&mut self, month: MonthId) -> &mut MonthRecord {
        self.months.entry(month).or_default()
    }

    /// All twelve months in calendar order
    pub fn months(&self) -> impl Iterator<Item = (MonthId, &MonthRecord)> + '_ {
        MonthId::ALL.into_iter().map(move |m| (m, self.month(m)))
    }

    /// Sum of an entry's postings across all twelve months
    pub fn entry_sum(&self, id: EntryId) -> Amount {
        self.months().map(|(_, month)| month.get(id)).sum()
    }

    /// Remove an entry and every posting made against it
    pub fn remove_entry(&mut self, id: EntryId) -> Option<Entry> {
        let removed = self.entries.remove(&id);
        for month in self.months.values_mut() {
            month.remove(id);
        }
        removed
    }

    /// Drop postings whose entry no longer exists
    pub fn prune_orphan_postings(&mut self) {
        let entries = &self.entries;
        for month in self.months.values_mut() {
            month.retain(|id| entries.contains_key(&id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> YearRecord {
        let mut year = YearRecord::new();
        year.entries.insert(EntryId::new(1), Entry::income("Salary", 1));
        year.entries.insert(EntryId::new(2), Entry::expense("Rent", 1));
        year.month_mut(MonthId::Jan).set(EntryId::new(1), Amount::from_cents(1000));
        year.month_mut(MonthId::Jan).set(EntryId::new(2), Amount::from_cents(400));
        year.month_mut(MonthId::Feb).set(EntryId::new(1), Amount::from_cents(1100));
        year
    }

    #[test]
    fn test_new_year_has_twelve_months() {
        let year = YearRecord::new();
        assert!(year.validate().is_ok());
        assert_eq!(year.months().count(), 12);

        let json = serde_json::to_value(&year).unwrap();
        assert_eq!(json["months"].as_object().unwrap().len(), 12);
        assert!(json["months"].get("dec").is_some());
    }

    #[test]
    fn test_validate_reports_missing_months() {
        let year: YearRecord =
            serde_json::from_str(r#"{"entries": {}, "months": {"jan": {}, "feb": {}}}"#).unwrap();
        let err = year.validate().unwrap_err();
        assert!(err.contains("mar"));
        assert!(err.contains("dec"));
        assert!(!err.contains("jan"));
    }

    #[test]
    fn test_validate_rejects_empty_entry_name() {
        let mut year = YearRecord::new();
        year.entries.insert(EntryId::new(1), Entry::income("", 1));
        assert!(year.validate().is_err());
    }

    #[test]
    fn test_entry_sum() {
        let year = sample();
        assert_eq!(year.entry_sum(EntryId::new(1)), Amount::from_cents(2100));
        assert_eq!(year.entry_sum(EntryId::new(2)), Amount::from_cents(400));
        assert_eq!(year.entry_sum(EntryId::new(9)), Amount::zero());
    }

    #[test]
    fn test_remove_entry_clears_postings() {
        let mut year = sample();
        let removed = year.remove_entry(EntryId::new(1));

        assert_eq!(removed, Some(Entry::income("Salary", 1)));
        assert!(year.entry(EntryId::new(1)).is_none());
        assert!(year.months().all(|(_, m)| !m.contains(EntryId::new(1))));
        assert_eq!(year.month(MonthId::Jan).get(EntryId::new(2)), Amount::from_cents(400));
    }

    #[test]
    fn test_prune_orphan_postings() {
        let mut year = sample();
        year.month_mut(MonthId::Mar).set(EntryId::new(7), Amount::from_cents(5));
        year.prune_orphan_postings();
        assert!(!year.month(MonthId::Mar).contains(EntryId::new(7)));
        assert!(year.month(MonthId::Jan).contains(EntryId::new(1)));
    }

    #[test]
    fn test_next_entry_id() {
        let mut year = YearRecord::new();
        assert_eq!(year.next_entry_id(), Some(EntryId::new(1)));
        for id in [1, 2, 5] {
            year.entries.insert(EntryId::new(id), Entry::expense("x", id as i64));
        }
        assert_eq!(year.next_entry_id(), Some(EntryId::new(6)));

        year.entries.insert(EntryId::new(u32::MAX), Entry::expense("last", 0));
        assert_eq!(year.next_entry_id(), None);
    }
}
