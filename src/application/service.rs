use std::path::{Path, PathBuf};

use crate::domain::{
    compute_balance, compute_summary, format_cents, next_id, Cents, Kind, Summary, Transaction,
    TransactionFilter, TransactionId, MAX_AMOUNT_CENTS,
};
use crate::io::{read_transactions, write_transactions};
use crate::storage::{LoadStatus, Repository};

use super::AppError;

/// Application service owning the ledger state.
/// This is the only interface the command loop uses to read or change transactions.
pub struct LedgerService {
    repo: Repository,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl LedgerService {
    /// Load the ledger stored at `data_file`.
    /// Never fails; the returned status says whether the file was used.
    pub fn load(data_file: impl Into<PathBuf>) -> (Self, LoadStatus) {
        let repo = Repository::new(data_file);
        let (transactions, status) = repo.load();
        let next_id = next_id(&transactions);
        (
            Self {
                repo,
                transactions,
                next_id,
            },
            status,
        )
    }

    pub fn data_file(&self) -> &Path {
        self.repo.path()
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Id the next added transaction will receive.
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new transaction and persist the ledger.
    ///
    /// The transaction stays in memory even when the write fails; the returned
    /// error then reports that the data file is behind.
    pub fn add(
        &mut self,
        kind: Kind,
        category: impl Into<String>,
        amount_cents: Cents,
        description: impl Into<String>,
    ) -> Result<Transaction, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be greater than zero".to_string(),
            ));
        }
        if amount_cents > MAX_AMOUNT_CENTS {
            return Err(AppError::InvalidAmount(format!(
                "Amount cannot exceed {}",
                format_cents(MAX_AMOUNT_CENTS)
            )));
        }

        let transaction = Transaction::new(self.next_id, kind, category, amount_cents, description);
        self.transactions.push(transaction.clone());
        self.next_id += 1;
        log::debug!(
            "added {} transaction {} ({} cents)",
            transaction.kind,
            transaction.id,
            transaction.amount
        );

        self.repo.save(&self.transactions)?;
        Ok(transaction)
    }

    /// Remove the transaction with the given id and persist the ledger.
    ///
    /// As with [`add`](Self::add), a failed write does not undo the removal.
    pub fn delete(&mut self, id: TransactionId) -> Result<Transaction, AppError> {
        let position = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(AppError::TransactionNotFound(id))?;

        let removed = self.transactions.remove(position);
        log::debug!("deleted transaction {}", id);

        self.repo.save(&self.transactions)?;
        Ok(removed)
    }

    // ========================
    // Queries
    // ========================

    /// Total income minus total expense.
    pub fn balance(&self) -> Result<Cents, AppError> {
        Ok(compute_balance(&self.transactions)?)
    }

    pub fn summary(&self) -> Result<Summary, AppError> {
        Ok(compute_summary(&self.transactions)?)
    }

    /// Transactions matching `filter`, in insertion order.
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .collect()
    }

    // ========================
    // Import / export
    // ========================

    /// Write every transaction to `path`. The main data file is not touched.
    pub fn export(&self, path: &Path) -> Result<usize, AppError> {
        let count = write_transactions(path, &self.transactions)?;
        log::debug!("exported {} transaction(s) to {}", count, path.display());
        Ok(count)
    }

    /// Replace the whole ledger with the contents of `path`.
    ///
    /// The replacement is written to the main data file before it is swapped in,
    /// so any failure leaves the current ledger exactly as it was.
    pub fn import(&mut self, path: &Path) -> Result<usize, AppError> {
        let imported = read_transactions(path)?;
        self.repo.save(&imported)?;

        self.next_id = next_id(&imported);
        self.transactions = imported;
        log::debug!(
            "imported {} transaction(s) from {}",
            self.transactions.len(),
            path.display()
        );
        Ok(self.transactions.len())
    }
}
