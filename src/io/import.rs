use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::application::AppError;
use crate::domain::{validate_transactions, Transaction};

/// Read and strictly validate a transaction file.
///
/// The top level must be a JSON array of objects, every object must decode into a
/// [`Transaction`], and the resulting list must satisfy the ledger invariants
/// (positive, unique ids and positive amounts).
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>, AppError> {
    let bytes = fs::read(path).map_err(|source| AppError::io(path, source))?;
    decode_transactions(path, &bytes)
}

/// Decode `bytes` read from `path`. The path is only used in error reports.
pub fn decode_transactions(path: &Path, bytes: &[u8]) -> Result<Vec<Transaction>, AppError> {
    let payload: Value = serde_json::from_slice(bytes).map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |reason: String| AppError::InvalidLedgerFile {
        path: path.to_path_buf(),
        reason,
    };

    let records = match payload {
        Value::Array(records) => records,
        other => {
            return Err(invalid(format!(
                "expected a list of transaction records, found {}",
                describe(&other)
            )));
        }
    };

    let mut transactions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            return Err(invalid(format!(
                "record {} is {}, not a key-value record",
                index + 1,
                describe(&record)
            )));
        }
        let transaction: Transaction = serde_json::from_value(record)
            .map_err(|e| invalid(format!("record {}: {}", index + 1, e)))?;
        transactions.push(transaction);
    }

    validate_transactions(&transactions).map_err(|e| invalid(e.to_string()))?;

    Ok(transactions)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
