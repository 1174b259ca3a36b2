//! Month posting CLI commands

use crate::display::format_month;
use crate::error::LedgerResult;
use crate::models::{Amount, EntryId, MonthId};

use super::session::Session;

/// Show the postings of one month
pub fn show_month(session: &mut Session, year: i32, month: MonthId) -> LedgerResult<()> {
    let ledger = session.open()?;
    let postings = ledger.month_entries(year, month)?;
    let entries = ledger.year_entries(year)?;
    print!(
        "{}",
        format_month(year, month, postings, entries, session.currency())
    );
    Ok(())
}

/// Set the amount of an entry in a month
pub fn set_value(
    session: &mut Session,
    year: i32,
    month: MonthId,
    id: EntryId,
    amount: Amount,
) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    ledger.set_month_value(year, month, id, amount)?;
    session.save(&mut ledger)?;

    let name = &ledger.entry(year, id)?.name;
    println!(
        "{} {} {}: {}",
        name,
        month.label(),
        year,
        amount.format_with_symbol(session.currency())
    );
    Ok(())
}

/// Add to the amount of an entry in a month
pub fn add_value(
    session: &mut Session,
    year: i32,
    month: MonthId,
    id: EntryId,
    amount: Amount,
) -> LedgerResult<()> {
    let mut ledger = session.open()?;
    let total = ledger.increment_month_value(year, month, id, amount)?;
    session.save(&mut ledger)?;

    let name = &ledger.entry(year, id)?.name;
    println!(
        "{} {} {}: {}",
        name,
        month.label(),
        year,
        total.format_with_symbol(session.currency())
    );
    Ok(())
}
