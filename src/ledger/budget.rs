use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of comparing spending against a monthly budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    Ok,
    Exceeded,
}

/// A spending limit. A non-positive limit means no budget is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub limit: Decimal,
}

impl Budget {
    pub fn new(limit: Decimal) -> Self {
        Self { limit }
    }

    pub fn is_set(&self) -> bool {
        self.limit > Decimal::ZERO
    }

    pub fn status(&self, total: Decimal) -> BudgetStatus {
        budget_status(total, self.limit)
    }
}

/// `Exceeded` only when a positive budget is strictly below the total.
pub fn budget_status(total: Decimal, budget: Decimal) -> BudgetStatus {
    if budget > Decimal::ZERO && total > budget {
        BudgetStatus::Exceeded
    } else {
        BudgetStatus::Ok
    }
}
