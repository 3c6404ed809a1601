// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Result;
use tally::application::LedgerService;
use tally::cli::{Session, Terminal};
use tally::domain::Kind;
use tempfile::TempDir;

pub type ScriptedTerminal = Terminal<Cursor<Vec<u8>>, Vec<u8>>;

/// Helper to create an empty ledger backed by a file in a temporary directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let (service, _) = LedgerService::load(temp_dir.path().join("ledger.json"));
    Ok((service, temp_dir))
}

/// Path of the main data file used by `test_service`
pub fn data_file(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("ledger.json")
}

/// Terminal that reads the given lines and captures everything written
pub fn scripted(lines: &[&str]) -> ScriptedTerminal {
    let mut input = lines.join("\n");
    input.push('\n');
    Terminal::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Run a full session over `lines` and return the ledger and captured output
pub fn run_script(service: LedgerService, lines: &[&str]) -> Result<(LedgerService, String)> {
    let mut session = Session::new(service, scripted(lines));
    session.run()?;
    let (service, terminal) = session.into_parts();
    Ok((service, String::from_utf8(terminal.into_output())?))
}

/// Test fixture: the salary / groceries ledger used across tests
pub struct StandardLedger;

impl StandardLedger {
    pub fn populate(service: &mut LedgerService) -> Result<()> {
        service.add(Kind::Income, "Salary", 100000, "March pay")?;
        service.add(Kind::Expense, "Groceries", 4550, "Weekly shop")?;
        service.add(Kind::Expense, "Rent", 60000, "April rent")?;
        service.add(Kind::Income, "Freelance", 25000, "Logo design")?;
        Ok(())
    }
}
