//! Monthly Sums Report
//!
//! For each month of a year: the posted entries ordered expenses first then
//! incomes (each by `order`), plus the month's income and expense totals.
//! Postings whose entry no longer exists are skipped.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, LedgerDocument, MonthId, YearRecord};

use super::year_summary::{truncate, EntrySum};

/// Sums of one month
#[derive(Debug, Clone)]
pub struct MonthSums {
    pub month: MonthId,
    pub sums: Vec<EntrySum>,
    pub total_income: Amount,
    pub total_expense: Amount,
}

impl MonthSums {
    /// Sums for all twelve months of `year`, January first
    pub fn for_year(document: &LedgerDocument, year: i32) -> LedgerResult<Vec<Self>> {
        let record = document
            .year(year)
            .ok_or_else(|| LedgerError::year_not_found(year))?;
        Ok(MonthId::ALL
            .into_iter()
            .map(|month| Self::from_record(record, month))
            .collect())
    }

    pub fn from_record(record: &YearRecord, month: MonthId) -> Self {
        let mut sums: Vec<EntrySum> = record
            .month(month)
            .iter()
            .filter_map(|(entry_id, value)| {
                record.entry(entry_id).map(|entry| EntrySum {
                    entry_id,
                    entry: entry.clone(),
                    sum: value,
                })
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
            month,
            sums,
            total_income,
            total_expense,
        }
    }

    /// Income minus expense
    pub fn balance(&self) -> Amount {
        self.total_income - self.total_expense
    }

    /// Format one month for terminal display
    pub fn format_terminal(&self, year: i32, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", self.month.label(), year));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.sums.is_empty() {
            output.push_str("No postings.\n");
        } else {
            for row in &self.sums {
                output.push_str(&format!(
                    "  {:<36} {:<8} {:>12}\n",
                    truncate(&row.entry.name, 36),
                    row.entry.entry_type,
                    row.sum.format_with_symbol(currency)
                ));
            }
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  {:<45} {:>12}\n",
            "Income",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "  {:<45} {:>12}\n",
            "Expense",
            self.total_expense.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "  {:<45} {:>12}\n",
            "Balance",
            self.balance().format_with_symbol(currency)
        ));

        output
    }
}
