//! Entry display formatting
//!
//! Formats a year's entries and single entries for terminal output.

use crate::models::{Entry, EntryId};

/// Format a list of years
pub fn format_year_list(years: &[i32]) -> String {
    if years.is_empty() {
        return "No years found.\n\nRun 'homebudget add-year <YEAR>' to create one.".to_string();
    }

    let mut output = String::from("Years:\n");
    for year in years {
        output.push_str(&format!("  {}\n", year));
    }
    output
}

/// Format the entries of a year as a table, in the order given
pub fn format_entry_list(year: i32, entries: &[(EntryId, &Entry)]) -> String {
    if entries.is_empty() {
        return format!("No entries in {}.", year);
    }

    let name_width = entries
        .iter()
        .map(|(_, e)| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6} {:<width$} {:<8} {:>6}\n",
        "ID",
        "Name",
        "Type",
        "Order",
        width = name_width
    ));
    output.push_str(&format!("{}\n", "-".repeat(name_width + 23)));

    for (id, entry) in entries {
        output.push_str(&format!(
            "{:<6} {:<width$} {:<8} {:>6}\n",
            id,
            entry.name,
            entry.entry_type,
            entry.order,
            width = name_width
        ));
    }

    output
}

/// Format a single entry's details
pub fn format_entry_details(year: i32, id: EntryId, entry: &Entry) -> String {
    let mut output = String::new();
    output.push_str(&format!("Entry:  {}\n", entry.name));
    output.push_str(&format!("  ID:    {}\n", id));
    output.push_str(&format!("  Year:  {}\n", year));
    output.push_str(&format!("  Type:  {}\n", entry.entry_type));
    output.push_str(&format!("  Order: {}\n", entry.order));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists() {
        assert!(format_year_list(&[]).contains("No years"));
        assert_eq!(format_entry_list(2021, &[]), "No entries in 2021.");
    }

    #[test]
    fn test_entry_list() {
        let rent = Entry::expense("Rent", 1);
        let salary = Entry::income("Salary", 1);
        let text = format_entry_list(2021, &[(EntryId::new(2), &rent), (EntryId::new(1), &salary)]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("2 "));
        assert!(lines[2].contains("expense"));
        assert!(lines[3].contains("Salary"));
    }

    #[test]
    fn test_entry_details() {
        let text = format_entry_details(2021, EntryId::new(3), &Entry::income("Bonus", 3));
        assert!(text.contains("Entry:  Bonus"));
        assert!(text.contains("Type:  income"));
    }
}
