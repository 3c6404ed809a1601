use std::collections::HashSet;

use super::{Cents, Kind, Transaction, TransactionId, MAX_AMOUNT_CENTS};

/// Total income and total expense over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub income: Cents,
    pub expense: Cents,
}

impl Summary {
    /// Net balance: income minus expense.
    pub fn net(&self) -> Cents {
        self.income - self.expense
    }
}

/// Which transactions a listing should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionFilter {
    All,
    Kind(Kind),
    /// Case-insensitive exact match on the category label
    Category(String),
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Kind(kind) => transaction.kind == *kind,
            TransactionFilter::Category(category) => {
                transaction.category.to_lowercase() == category.to_lowercase()
            }
        }
    }
}

/// Compute the balance from a list of transactions.
/// Balance = sum of income - sum of expenses
pub fn compute_balance(transactions: &[Transaction]) -> Result<Cents, LedgerError> {
    compute_summary(transactions).map(|summary| summary.net())
}

/// Compute total income and total expense.
pub fn compute_summary(transactions: &[Transaction]) -> Result<Summary, LedgerError> {
    transactions
        .iter()
        .try_fold(Summary::default(), |mut summary, tx| {
            let total = match tx.kind {
                Kind::Income => &mut summary.income,
                Kind::Expense => &mut summary.expense,
            };
            *total = total
                .checked_add(tx.amount)
                .ok_or(LedgerError::TotalOverflow)?;
            Ok(summary)
        })
}

/// The id the next added transaction receives: highest existing id + 1, or 1 when empty.
pub fn next_id(transactions: &[Transaction]) -> TransactionId {
    transactions.iter().map(|tx| tx.id).max().unwrap_or(0) + 1
}

/// Check the invariants every stored ledger must hold.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for tx in transactions {
        if tx.id == 0 {
            return Err(LedgerError::NonPositiveId);
        }
        if !seen.insert(tx.id) {
            return Err(LedgerError::DuplicateId(tx.id));
        }
        if tx.amount <= 0 {
            return Err(LedgerError::NonPositiveAmount(tx.id));
        }
        if tx.amount > MAX_AMOUNT_CENTS {
            return Err(LedgerError::AmountTooLarge(tx.id));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    NonPositiveId,
    DuplicateId(TransactionId),
    NonPositiveAmount(TransactionId),
    AmountTooLarge(TransactionId),
    TotalOverflow,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::NonPositiveId => write!(f, "transaction ids must be positive"),
            LedgerError::DuplicateId(id) => write!(f, "transaction id {} appears more than once", id),
            LedgerError::NonPositiveAmount(id) => {
                write!(f, "transaction {} has a non-positive amount", id)
            }
            LedgerError::AmountTooLarge(id) => {
                write!(f, "transaction {} exceeds the largest supported amount", id)
            }
            LedgerError::TotalOverflow => write!(f, "ledger totals are too large to compute"),
        }
    }
}

impl std::error::Error for LedgerError {}
