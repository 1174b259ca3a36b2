//! Entry identifiers
//!
//! Entry ids are small integers, unique within one year and never reused:
//! a new entry always gets `1 + max(existing ids)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an entry within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u32);

impl EntryId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The id following the largest of `ids` (1 if there are none)
    ///
    /// `None` once `u32::MAX` is taken.
    pub fn next_after<I>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = EntryId>,
    {
        ids.into_iter()
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .map(Self)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for EntryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for EntryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_next_after() {
        let ids = [1, 2, 5].map(EntryId::new);
        assert_eq!(EntryId::next_after(ids), Some(EntryId::new(6)));
        assert_eq!(EntryId::next_after([]), Some(EntryId::new(1)));
        assert_eq!(EntryId::next_after([EntryId::new(u32::MAX)]), None);
    }

    #[test]
    fn test_parse_and_display() {
        let id: EntryId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<EntryId>().is_err());
    }

    #[test]
    fn test_as_json_map_key() {
        let map = BTreeMap::from([(EntryId::new(1), 1000i64), (EntryId::new(12), 5)]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":1000,"12":5}"#);

        let back: BTreeMap<EntryId, i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
