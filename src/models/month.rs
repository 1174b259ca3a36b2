//! Calendar months and per-month postings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{Amount, EntryId};

/// One of the twelve calendar months, serialized as a three-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthId {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthId {
    /// All months in calendar order
    pub const ALL: [MonthId; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Calendar position, 1 for January
    pub fn order(self) -> u32 {
        self as u32 + 1
    }

    /// Month at calendar position `order` (1-12)
    pub fn from_order(order: u32) -> Option<Self> {
        let index = usize::try_from(order.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Three-letter lowercase code used in the document
    pub fn code(self) -> &'static str {
        match self {
            Self::Jan => "jan",
            Self::Feb => "feb",
            Self::Mar => "mar",
            Self::Apr => "apr",
            Self::May => "may",
            Self::Jun => "jun",
            Self::Jul => "jul",
            Self::Aug => "aug",
            Self::Sep => "sep",
            Self::Oct => "oct",
            Self::Nov => "nov",
            Self::Dec => "dec",
        }
    }

    /// Full English month name
    pub fn label(self) -> &'static str {
        match self {
            Self::Jan => "January",
            Self::Feb => "February",
            Self::Mar => "March",
            Self::Apr => "April",
            Self::May => "May",
            Self::Jun => "June",
            Self::Jul => "July",
            Self::Aug => "August",
            Self::Sep => "September",
            Self::Oct => "October",
            Self::Nov => "November",
            Self::Dec => "December",
        }
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for MonthId {
    type Err = String;

    /// Accepts a code ("jan"), a full name ("January") or a number ("1")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(order) = s.parse::<u32>() {
            return Self::from_order(order).ok_or_else(|| format!("Invalid month number: {}", s));
        }
        Self::ALL
            .into_iter()
            .find(|m| m.code() == s || m.label().to_lowercase() == s)
            .ok_or_else(|| format!("Invalid month: {}", s))
    }
}

/// Amounts posted in one month, keyed by entry id
///
/// An entry with no posting has the value zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthRecord(BTreeMap<EntryId, Amount>);

impl MonthRecord {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The posted value for `id`, zero when absent
    pub fn get(&self, id: EntryId) -> Amount {
        self.0.get(&id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: EntryId, value: Amount) {
        self.0.insert(id, value);
    }

    /// Add `value` to the posting for `id` and return the new value
    ///
    /// Returns `None` and leaves the posting untouched on overflow.
    pub fn add(&mut self, id: EntryId, value: Amount) -> Option<Amount> {
        let total = self.get(id).checked_add(value)?;
        self.0.insert(id, total);
        Some(total)
    }

    pub fn remove(&mut self, id: EntryId) -> Option<Amount> {
        self.0.remove(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(EntryId) -> bool) {
        self.0.retain(|id, _| keep(*id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, Amount)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(EntryId, Amount)> for MonthRecord {
    fn from_iter<I: IntoIterator<Item = (EntryId, Amount)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
