#![doc(test(attr(deny(warnings))))]

//! Expense Ledger records personal expenses, answers category, month and
//! text queries over them, and persists them as a flat comma separated file.
//!
//! ```
//! use expense_ledger::ledger::{DateFormat, ExpenseFilter, Ledger};
//!
//! let mut ledger = Ledger::new(DateFormat::Iso);
//! ledger.add("2024-01-15", "Food", "250.50", "lunch").unwrap();
//! ledger.add("2024-02-01", "Bills", "1000", "electricity").unwrap();
//!
//! let january = ExpenseFilter::new().in_month("January");
//! assert_eq!(ledger.query(&january).count(), 1);
//! assert_eq!(ledger.total().to_string(), "1250.50");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Ledger tracing initialized.");
    });
}
