use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by ledger operations and persistence.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Corrupt record on line {line}: {reason}")]
    CorruptRecord { line: usize, reason: CorruptReason },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

/// Rejection of a single interactive entry. Nothing is appended when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{input}` is not a date in the {expected} format")]
    InvalidDate { input: String, expected: String },
    #[error("`{input}` is not a valid amount")]
    InvalidAmount { input: String },
}

/// Why a persisted line could not be turned back into an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    /// Fewer than four comma separated fields were present.
    FieldCount(usize),
    Invalid(ValidationError),
}

impl fmt::Display for CorruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptReason::FieldCount(found) => {
                write!(f, "expected 4 fields, found {found}")
            }
            CorruptReason::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, LedgerError::CorruptRecord { .. })
    }
}
