//! Year and entry CLI commands

use crate::display::{format_entry_details, format_entry_list, format_year_list};
use crate::error::LedgerResult;
use crate::models::{EntryId, EntryType};

use super::session::Session;

/// List the years of the ledger
pub fn list_years(session: &mut Session) -> LedgerResult<()> {
    let ledger = session.open()?;
    print!("{}", format_year_list(&ledger.years()));
    Ok(())
}

/// Add an empty year
pub fn add_year(session: &mut Session, year: i32) -> LedgerResult<()> {
    let mut ledger = session.open_or_create()?;
    ledger.add_year(year)?;
    session.save(&mut ledger)?;
    println!("Added year {}", year);
    Ok(())
}

/// Copy entry definitions from one year into another
pub fn copy_entries(session: &mut Session, from: i32, to: i32) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let copied = ledger.copy_entries(from, to)?;
    if ledger.is_modified() {
        session.save(&mut ledger)?;
    }
    println!("Copied {} entries from {} to {}", copied, from, to);
    Ok(())
}

/// List the entries of a year
pub fn list_entries(session: &mut Session, year: i32) -> LedgerResult<()> {
    let ledger = session.open()?;
    let entries = ledger.sorted_entries(year)?;
    print!("{}", format_entry_list(year, &entries));
    Ok(())
}

/// Add an entry to a year
pub fn add_entry(
    session: &mut Session,
    year: i32,
    name: Option<String>,
    entry_type: EntryType,
) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let id = match name {
        Some(name) => ledger.add_entry(year, &name, entry_type)?,
        None => ledger.new_entry(year, entry_type)?,
    };
    session.save(&mut ledger)?;

    println!("Created entry");
    print!("{}", format_entry_details(year, id, ledger.entry(year, id)?));
    Ok(())
}

/// Rename an entry
pub fn rename_entry(session: &mut Session, year: i32, id: EntryId, name: &str) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let old = ledger.entry(year, id)?.name.clone();
    ledger.rename_entry(year, id, name)?;
    session.save(&mut ledger)?;
    println!("Renamed '{}' to '{}'", old, ledger.entry(year, id)?.name);
    Ok(())
}

/// Apply new order values
pub fn reorder(session: &mut Session, year: i32, orders: &[(EntryId, i64)]) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    ledger.reorder_entries(year, orders)?;
    session.save(&mut ledger)?;
    println!("Reordered {} entries", orders.len());
    Ok(())
}

/// Delete an entry and its postings
pub fn delete_entry(session: &mut Session, year: i32, id: EntryId) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let removed = ledger.delete_entry(year, id)?;
    session.save(&mut ledger)?;
    println!("Deleted entry '{}' from {}", removed.name, year);
    Ok(())
}

/// Parse an `ID=ORDER` pair
pub fn parse_order(s: &str) -> Result<(EntryId, i64), String> {
    let (id, order) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected ID=ORDER, got '{}'", s))?;
    let id = id
        .parse::<EntryId>()
        .map_err(|e| format!("Invalid entry id '{}': {}", id, e))?;
    let order = order
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("Invalid order '{}': {}", order, e))?;
    Ok((id, order))
}
