use std::io::{stdin, stdout};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::application::LedgerService;
use crate::storage::{LoadStatus, DEFAULT_DATA_FILE};

mod commands;
mod console;

pub use commands::*;
pub use console::*;

/// Tally - Personal Finance Ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record income and expenses and track your balance from an interactive prompt")]
#[command(version)]
pub struct Cli {
    /// Ledger data file
    #[arg(short = 'f', long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let terminal = Terminal::new(stdin().lock(), stdout().lock());
        start_session(&self.data_file, terminal)
    }
}

/// Load the ledger, greet the user and run the command loop on `console`.
pub fn start_session<C: Console>(data_file: &std::path::Path, mut console: C) -> Result<()> {
    say(&mut console, "Personal Finance Ledger")?;
    say(&mut console, "Welcome! Type 'help' to see commands.")?;

    let (service, status) = LedgerService::load(data_file);
    match status {
        LoadStatus::Loaded { count } => say(
            &mut console,
            format!(
                "Loaded {} transaction(s) from {}.",
                count,
                data_file.display()
            ),
        )?,
        LoadStatus::Fresh => say(&mut console, "Starting with a fresh, empty ledger.")?,
        LoadStatus::Recovered(e) => say(
            &mut console,
            format!("Warning: {}. Starting with an empty ledger.", e),
        )?,
    }

    let mut session = Session::new(service, console);
    session.show_help()?;
    session.run()
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
