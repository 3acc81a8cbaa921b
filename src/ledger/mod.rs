//! Expense records, the in-memory ledger, and its query helpers.

pub mod budget;
pub mod date_format;
pub mod expense;
pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use budget::{budget_status, Budget, BudgetStatus};
pub use date_format::{parse_amount, DateFormat};
pub use expense::Expense;
pub use filter::{CategoryMatch, ExpenseFilter, ALL_SENTINEL};
pub use ledger::{total, Ledger};
