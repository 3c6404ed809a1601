mod repository;

pub use repository::*;

/// Data file used when none is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "ledger_data.json";
