//! Report CLI commands

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::MonthId;

use super::session::Session;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Yearly sum of every entry
    Year {
        /// Year (e.g., 2021)
        year: i32,
    },

    /// Per-month sums, for one month or the whole year
    Month {
        /// Year (e.g., 2021)
        year: i32,
        /// Month (jan..dec, name or number); all months if omitted
        month: Option<MonthId>,
    },
}

/// Handle a report command
pub fn handle_report_command(session: &mut Session, cmd: ReportCommands) -> LedgerResult<()> {
    let ledger = session.open()?;
    let currency = session.currency();

    match cmd {
        ReportCommands::Year { year } => {
            print!("{}", ledger.year_sums(year)?.format_terminal(currency));
        }

        ReportCommands::Month { year, month } => {
            let months = ledger.months_sums(year)?;
            let selected = months
                .iter()
                .filter(|m| month.map_or(true, |wanted| m.month == wanted));
            for (i, sums) in selected.enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", sums.format_terminal(year, currency));
            }
        }
    }

    Ok(())
}
