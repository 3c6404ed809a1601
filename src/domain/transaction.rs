use std::str::FromStr;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{decimal, Cents};

pub type TransactionId = u64;

/// Layout used for transaction timestamps, both on screen and on disk.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Money coming in (salary, refunds, gifts)
    Income,
    /// Money going out
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(format!("unknown transaction kind '{}'", other)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded income or expense event.
/// Transactions are never edited; the only way to change the ledger is to add or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Creation time on the local clock, second precision
    #[serde(with = "timestamp_format", alias = "date")]
    pub timestamp: NaiveDateTime,
    #[serde(alias = "type")]
    pub kind: Kind,
    /// Stored as typed; matched case-insensitively when filtering
    pub category: String,
    /// Always positive
    #[serde(with = "decimal")]
    pub amount: Cents,
    pub description: String,
}

impl Transaction {
    /// Create a transaction stamped with the current local time.
    /// The id must be assigned by the ledger.
    pub fn new(
        id: TransactionId,
        kind: Kind,
        category: impl Into<String>,
        amount: Cents,
        description: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(id, now(), kind, category, amount, description)
    }

    pub fn with_timestamp(
        id: TransactionId,
        timestamp: NaiveDateTime,
        kind: Kind,
        category: impl Into<String>,
        amount: Cents,
        description: impl Into<String>,
    ) -> Self {
        assert!(amount > 0, "Transaction amount must be positive");
        Self {
            id,
            timestamp,
            kind,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    /// Amount with its effect on the balance: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}
