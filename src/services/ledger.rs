//! Ledger service
//!
//! The `Ledger` owns the open document, tracks whether it has unsaved
//! changes, and knows the file and password it was opened from. Every
//! mutation goes through here; persistence happens only on `save`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::crypto::{KeyDerivationParams, SecureString};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Amount, Entry, EntryId, EntryType, LedgerDocument, MonthId, MonthRecord, YearEntries,
    YearRecord, YEAR_RANGE,
};
use crate::reports::{MonthSums, YearSummary};
use crate::storage::{CryptoWorker, IdentityEncoder, JsonFile, PasswordEncoder, WriteOutcome};

/// File location and password a document is bound to
#[derive(Debug, Clone)]
struct DocumentTarget {
    path: PathBuf,
    password: Option<SecureString>,
}

impl DocumentTarget {
    fn store(&self, params: KeyDerivationParams) -> JsonFile<LedgerDocument> {
        match &self.password {
            Some(password) => JsonFile::with_encoder(
                &self.path,
                CryptoWorker::new(PasswordEncoder::with_params(password.clone(), params)),
            ),
            None => JsonFile::with_encoder(&self.path, IdentityEncoder),
        }
    }
}

/// The open ledger document
#[derive(Debug)]
pub struct Ledger {
    document: LedgerDocument,
    modified: bool,
    target: Option<DocumentTarget>,
    key_derivation: KeyDerivationParams,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A new, empty, unsaved ledger
    pub fn new() -> Self {
        Self {
            document: LedgerDocument::new(),
            modified: false,
            target: None,
            key_derivation: KeyDerivationParams::default(),
        }
    }

    /// Use `params` when encrypting on the next saves
    pub fn with_key_derivation(mut self, params: KeyDerivationParams) -> Self {
        self.key_derivation = params;
        self
    }

    // === Persistence ===

    /// Open the document at `path`
    ///
    /// Fails with `FileAbsent` when there is no such file, `Decryption` on a
    /// wrong password, `MalformedEnvelope` when the encrypted wrapper is
    /// broken, and `MalformedDocument` when the text is not a valid ledger.
    pub fn open(path: impl Into<PathBuf>, password: Option<SecureString>) -> LedgerResult<Self> {
        let target = DocumentTarget {
            path: path.into(),
            password,
        };
        let key_derivation = KeyDerivationParams::default();

        let document = target
            .store(key_derivation)
            .read()?
            .ok_or_else(|| LedgerError::FileAbsent(target.path.clone()))?;

        document.validate().map_err(|e| {
            LedgerError::MalformedDocument(format!("{}: {}", target.path.display(), e))
        })?;

        info!(
            path = %target.path.display(),
            years = document.years().len(),
            encrypted = target.password.is_some(),
            "Opened ledger"
        );

        Ok(Self {
            document,
            modified: false,
            target: Some(target),
            key_derivation,
        })
    }

    /// Open the document at `path`, or start an empty one bound to it
    pub fn open_or_create(
        path: impl Into<PathBuf>,
        password: Option<SecureString>,
    ) -> LedgerResult<Self> {
        let path = path.into();
        match Self::open(&path, password.clone()) {
            Err(LedgerError::FileAbsent(_)) => {
                info!(path = %path.display(), "Starting new ledger");
                Ok(Self {
                    target: Some(DocumentTarget { path, password }),
                    ..Self::new()
                })
            }
            result => result,
        }
    }

    /// Persist the document to the file it is bound to
    pub fn save(&mut self) -> LedgerResult<WriteOutcome> {
        let target = self.target.as_ref().ok_or(LedgerError::NoTargetPath)?;
        let outcome = target.store(self.key_derivation).write(&self.document)?;
        self.modified = false;
        info!(path = %target.path.display(), "Saved ledger");
        Ok(outcome)
    }

    /// Persist the document to a new file, binding it there on success
    pub fn save_as(
        &mut self,
        path: impl Into<PathBuf>,
        password: Option<SecureString>,
    ) -> LedgerResult<WriteOutcome> {
        let target = DocumentTarget {
            path: path.into(),
            password,
        };
        let outcome = target.store(self.key_derivation).write(&self.document)?;
        info!(path = %target.path.display(), "Saved ledger as new file");
        self.target = Some(target);
        self.modified = false;
        Ok(outcome)
    }

    /// Whether there are changes not yet saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether `save` knows where to write
    pub fn has_path(&self) -> bool {
        self.target.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.target.as_ref().map(|t| t.path.as_path())
    }

    /// Whether the bound file is stored encrypted
    pub fn is_encrypted(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|t| t.password.is_some())
    }

    pub fn document(&self) -> &LedgerDocument {
        &self.document
    }

    /// Pretty JSON of the in-memory document
    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    // === Years ===

    /// Years in ascending order
    pub fn years(&self) -> Vec<i32> {
        self.document.years()
    }

    /// Add an empty year with all twelve months
    pub fn add_year(&mut self, year: i32) -> LedgerResult<()> {
        if !YEAR_RANGE.contains(&year) {
            return Err(LedgerError::Validation(format!(
                "Year must have four digits: {}",
                year
            )));
        }
        if self.document.contains_year(year) {
            return Err(LedgerError::Duplicate {
                entity_type: "Year",
                identifier: year.to_string(),
            });
        }

        self.document.insert_year(year, YearRecord::new());
        self.touch();
        debug!(year, "Added year");
        Ok(())
    }

    /// Copy entry definitions of `from` whose ids are unused in `to`
    ///
    /// Returns the number of entries copied. Postings are not copied.
    pub fn copy_entries(&mut self, from: i32, to: i32) -> LedgerResult<usize> {
        let source = self.year(from)?.entries.clone();
        let target = self.year_mut(to)?;

        let mut copied = 0;
        for (id, entry) in source {
            if !target.entries.contains_key(&id) {
                target.entries.insert(id, entry);
                copied += 1;
            }
        }

        if copied > 0 {
            self.touch();
        }
        debug!(from, to, copied, "Copied entries");
        Ok(copied)
    }

    // === Entries ===

    /// Entries of a year keyed by id
    pub fn year_entries(&self, year: i32) -> LedgerResult<&YearEntries> {
        Ok(&self.year(year)?.entries)
    }

    /// Entries of a year in display order (type, then order, then id)
    pub fn sorted_entries(&self, year: i32) -> LedgerResult<Vec<(EntryId, &Entry)>> {
        let mut entries: Vec<_> = self
            .year_entries(year)?
            .iter()
            .map(|(id, entry)| (*id, entry))
            .collect();
        entries.sort_by(|a, b| a.1.report_cmp(b.1).then(a.0.cmp(&b.0)));
        Ok(entries)
    }

    /// Look up one entry
    pub fn entry(&self, year: i32, id: EntryId) -> LedgerResult<&Entry> {
        self.year(year)?
            .entry(id)
            .ok_or_else(|| LedgerError::entry_not_found(year, id))
    }

    /// Replace a year's entries, dropping postings of removed ids
    pub fn set_year_entries(&mut self, year: i32, entries: YearEntries) -> LedgerResult<()> {
        let mut cleaned = YearEntries::new();
        for (id, mut entry) in entries {
            entry.name = normalize_name(&entry.name)?;
            cleaned.insert(id, entry);
        }

        let record = self.year_mut(year)?;
        record.entries = cleaned;
        record.prune_orphan_postings();
        self.touch();
        Ok(())
    }

    /// Rename an entry
    pub fn rename_entry(&mut self, year: i32, id: EntryId, name: &str) -> LedgerResult<()> {
        let name = normalize_name(name)?;
        let entry = self
            .year_mut(year)?
            .entries
            .get_mut(&id)
            .ok_or_else(|| LedgerError::entry_not_found(year, id))?;
        entry.name = name;
        self.touch();
        Ok(())
    }

    /// Add an entry with the default name; its order equals its new id
    pub fn new_entry(&mut self, year: i32, entry_type: EntryType) -> LedgerResult<EntryId> {
        self.insert_entry(year, Entry::DEFAULT_NAME.to_string(), entry_type)
    }

    /// Add a named entry; its order equals its new id
    pub fn add_entry(
        &mut self,
        year: i32,
        name: &str,
        entry_type: EntryType,
    ) -> LedgerResult<EntryId> {
        let name = normalize_name(name)?;
        self.insert_entry(year, name, entry_type)
    }

    fn insert_entry(
        &mut self,
        year: i32,
        name: String,
        entry_type: EntryType,
    ) -> LedgerResult<EntryId> {
        let record = self.year_mut(year)?;
        let id = record.next_entry_id().ok_or_else(|| {
            LedgerError::Validation(format!("No entry ids left in {}", year))
        })?;
        record
            .entries
            .insert(id, Entry::new(name, entry_type, i64::from(id.get())));
        self.touch();
        debug!(year, %id, %entry_type, "Added entry");
        Ok(id)
    }

    /// Apply new order values; nothing changes unless every id exists
    pub fn reorder_entries(&mut self, year: i32, orders: &[(EntryId, i64)]) -> LedgerResult<()> {
        let record = self.year_mut(year)?;
        if let Some((missing, _)) = orders
            .iter()
            .find(|(id, _)| !record.entries.contains_key(id))
        {
            return Err(LedgerError::entry_not_found(year, missing));
        }

        for (id, order) in orders {
            if let Some(entry) = record.entries.get_mut(id) {
                entry.order = *order;
            }
        }
        self.touch();
        Ok(())
    }

    /// Delete an entry and all of its postings in that year
    pub fn delete_entry(&mut self, year: i32, id: EntryId) -> LedgerResult<Entry> {
        let removed = self
            .year_mut(year)?
            .remove_entry(id)
            .ok_or_else(|| LedgerError::entry_not_found(year, id))?;
        self.touch();
        debug!(year, %id, "Deleted entry");
        Ok(removed)
    }

    // === Months ===

    /// Postings of one month
    pub fn month_entries(&self, year: i32, month: MonthId) -> LedgerResult<&MonthRecord> {
        Ok(self.year(year)?.month(month))
    }

    /// Set the amount posted to an entry in a month
    pub fn set_month_value(
        &mut self,
        year: i32,
        month: MonthId,
        id: EntryId,
        value: Amount,
    ) -> LedgerResult<()> {
        self.existing_entry_year_mut(year, id)?
            .month_mut(month)
            .set(id, value);
        self.touch();
        Ok(())
    }

    /// Add to the amount posted to an entry in a month, returning the new amount
    pub fn increment_month_value(
        &mut self,
        year: i32,
        month: MonthId,
        id: EntryId,
        value: Amount,
    ) -> LedgerResult<Amount> {
        let total = self
            .existing_entry_year_mut(year, id)?
            .month_mut(month)
            .add(id, value)
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Amount overflow adding {} to entry {} in {} {}",
                    value, id, month, year
                ))
            })?;
        self.touch();
        Ok(total)
    }

    // === Sums ===

    /// Sum of an entry across the twelve months
    pub fn entry_year_sum(&self, year: i32, id: EntryId) -> LedgerResult<Amount> {
        let record = self.year(year)?;
        if record.entry(id).is_none() {
            return Err(LedgerError::entry_not_found(year, id));
        }
        Ok(record.entry_sum(id))
    }

    /// Yearly sums of every entry
    pub fn year_sums(&self, year: i32) -> LedgerResult<YearSummary> {
        YearSummary::generate(&self.document, year)
    }

    /// Per-month sums for all twelve months of a year
    pub fn months_sums(&self, year: i32) -> LedgerResult<Vec<MonthSums>> {
        MonthSums::for_year(&self.document, year)
    }

    // === Helpers ===

    fn year(&self, year: i32) -> LedgerResult<&YearRecord> {
        self.document
            .year(year)
            .ok_or_else(|| LedgerError::year_not_found(year))
    }

    fn year_mut(&mut self, year: i32) -> LedgerResult<&mut YearRecord> {
        self.document
            .year_mut(year)
            .ok_or_else(|| LedgerError::year_not_found(year))
    }

    fn existing_entry_year_mut(&mut self, year: i32, id: EntryId) -> LedgerResult<&mut YearRecord> {
        let record = self.year_mut(year)?;
        if record.entry(id).is_none() {
            return Err(LedgerError::entry_not_found(year, id));
        }
        Ok(record)
    }

    fn touch(&mut self) {
        self.modified = true;
    }
}

fn normalize_name(name: &str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Entry name cannot be empty".into()));
    }
    Ok(name.to_string())
}
