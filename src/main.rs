use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use homebudget::cli::{handle_command, Commands, DocumentOptions, Session};
use homebudget::config::{BudgetPaths, Settings};

/// Environment variable holding the log filter (e.g. `debug`)
const LOG_ENV: &str = "HOMEBUDGET_LOG";

#[derive(Parser)]
#[command(
    name = "homebudget",
    author = "Kaylee Beyene",
    version,
    about = "Yearly income and expense ledger",
    long_about = "homebudget keeps a household budget as one JSON file, optionally \
                  encrypted with a password. Each year has its own income and \
                  expense entries and twelve months of amounts."
)]
struct Cli {
    #[command(flatten)]
    document: DocumentOptions,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(config = %paths.base_dir().display(), "Loaded settings");

    let mut session = Session::new(paths, settings, cli.document);
    handle_command(&mut session, cli.command)?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
