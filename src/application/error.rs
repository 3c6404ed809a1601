use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{LedgerError, TransactionId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transaction ID {0} not found")]
    TransactionNotFound(TransactionId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid ledger file {}: {reason}", path.display())]
    InvalidLedgerFile { path: PathBuf, reason: String },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Invalid filter choice: '{0}'")]
    InvalidFilter(String),

    #[error("File not found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown command: '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),
}

impl AppError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::FileNotFound(path)
        } else {
            AppError::Io { path, source }
        }
    }
}
