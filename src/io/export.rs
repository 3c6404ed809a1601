use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::application::AppError;
use crate::domain::Transaction;

const INDENT: &[u8] = b"    ";

/// Serialize transactions as a JSON array indented with four spaces.
pub fn encode_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), serde_json::Error> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    transactions.serialize(&mut serializer)
}

/// Overwrite the file at `path` with the full transaction list.
/// Returns the number of transactions written.
pub fn write_transactions(path: &Path, transactions: &[Transaction]) -> Result<usize, AppError> {
    let mut buffer = Vec::new();
    encode_transactions(&mut buffer, transactions).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    buffer.push(b'\n');

    fs::write(path, &buffer).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "wrote {} transaction(s) to {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions.len())
}
