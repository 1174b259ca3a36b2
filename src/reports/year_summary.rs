//! Year Summary Report
//!
//! Yearly sum of every entry, with income and expense totals.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, Entry, EntryId, LedgerDocument, YearRecord};

/// An entry together with a summed amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySum {
    pub entry_id: EntryId,
    pub entry: Entry,
    pub sum: Amount,
}

impl EntrySum {
    /// Sort key shared by all reports: type, then order, then id
    pub(crate) fn sort(sums: &mut [EntrySum]) {
        sums.sort_by(|a, b| {
            a.entry
                .report_cmp(&b.entry)
                .then(a.entry_id.cmp(&b.entry_id))
        });
    }
}

/// Per-entry yearly sums for one year
#[derive(Debug, Clone)]
pub struct YearSummary {
    pub year: i32,
    /// Every entry of the year, expenses first, each by order
    pub sums: Vec<EntrySum>,
    pub total_income: Amount,
    pub total_expense: Amount,
}

impl YearSummary {
    /// Generate the summary for `year`
    pub fn generate(document: &LedgerDocument, year: i32) -> LedgerResult<Self> {
        let record = document
            .year(year)
            .ok_or_else(|| LedgerError::year_not_found(year))?;
        Ok(Self::from_record(year, record))
    }

    pub fn from_record(year: i32, record: &YearRecord) -> Self {
        let mut sums: Vec<EntrySum> = record
            .entries
            .iter()
            .map(|(id, entry)| EntrySum {
                entry_id: *id,
                entry: entry.clone(),
                sum: record.entry_sum(*id),
            })
            .collect();
        EntrySum::sort(&mut sums);

        let total_income = sums
            .iter()
            .filter(|s| s.entry.is_income())
            .map(|s| s.sum)
            .sum();
        let total_expense = sums
            .iter()
            .filter(|s| s.entry.is_expense())
            .map(|s| s.sum)
            .sum();

        Self {
            year,
            sums,
            total_income,
            total_expense,
        }
    }

    /// Income minus expense
    pub fn balance(&self) -> Amount {
        self.total_income - self.total_expense
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Year Summary - {}\n", self.year));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.sums.is_empty() {
            output.push_str("No entries.\n");
            return output;
        }

        output.push_str(&format!("{:<6} {:<30} {:<8} {:>12}\n", "ID", "Entry", "Type", "Sum"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.sums {
            output.push_str(&format!(
                "{:<6} {:<30} {:<8} {:>12}\n",
                row.entry_id,
                truncate(&row.entry.name, 30),
                row.entry.entry_type,
                row.sum.format_with_symbol(currency)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<46} {:>12}\n",
            "Total income",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<46} {:>12}\n",
            "Total expense",
            self.total_expense.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<46} {:>12}\n",
            "Balance",
            self.balance().format_with_symbol(currency)
        ));

        output
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
