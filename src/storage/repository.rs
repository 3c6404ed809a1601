use std::path::{Path, PathBuf};

use crate::application::AppError;
use crate::domain::Transaction;
use crate::io::{read_transactions, write_transactions};

/// Outcome of reading the main data file at startup.
#[derive(Debug)]
pub enum LoadStatus {
    /// The file was read and validated.
    Loaded { count: usize },
    /// No file yet; the ledger starts empty.
    Fresh,
    /// The file could not be used; the ledger starts empty and the cause is kept for reporting.
    Recovered(AppError),
}

/// Repository for the main persisted ledger file.
/// Every save rewrites the file in full.
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the data file. Never fails: a missing file yields an empty list, and any other
    /// problem yields an empty list plus the cause.
    pub fn load(&self) -> (Vec<Transaction>, LoadStatus) {
        match read_transactions(&self.path) {
            Ok(transactions) => {
                let count = transactions.len();
                log::debug!("loaded {} transaction(s) from {}", count, self.path.display());
                (transactions, LoadStatus::Loaded { count })
            }
            Err(AppError::FileNotFound(_)) => {
                log::debug!("{} does not exist, starting empty", self.path.display());
                (Vec::new(), LoadStatus::Fresh)
            }
            Err(e) => {
                log::warn!("ignoring unusable ledger file: {}", e);
                (Vec::new(), LoadStatus::Recovered(e))
            }
        }
    }

    /// Overwrite the data file with `transactions`.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), AppError> {
        write_transactions(&self.path, transactions)
            .map(|_| ())
            .inspect_err(|e| log::error!("failed to save ledger: {}", e))
    }
}
