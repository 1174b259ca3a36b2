//! Month display formatting

use crate::models::{Amount, EntryId, MonthId, MonthRecord, YearEntries};

/// Format the postings of one month, in entry display order
///
/// Postings against ids missing from `entries` are listed last.
pub fn format_month(
    year: i32,
    month: MonthId,
    postings: &MonthRecord,
    entries: &YearEntries,
    currency: &str,
) -> String {
    let mut output = format!("{} {}\n", month.label(), year);

    if postings.is_empty() {
        output.push_str("  (no postings)\n");
        return output;
    }

    let mut rows: Vec<(EntryId, Amount)> = postings.iter().collect();
    rows.sort_by(|(a, _), (b, _)| match (entries.get(a), entries.get(b)) {
        (Some(x), Some(y)) => x.report_cmp(y).then(a.cmp(b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    for (id, value) in rows {
        let (name, kind) = match entries.get(&id) {
            Some(entry) => (entry.name.clone(), entry.entry_type.to_string()),
            None => (format!("(unknown entry {})", id), String::new()),
        };
        output.push_str(&format!(
            "  {:<6} {:<30} {:<8} {:>12}\n",
            id,
            name,
            kind,
            value.format_with_symbol(currency)
        ));
    }

    output
}
