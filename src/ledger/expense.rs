use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded expense. Fields are fixed at construction; equal field
/// values make two records indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    date: NaiveDate,
    category: String,
    amount: Decimal,
    #[serde(default)]
    description: String,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn month(&self) -> Month {
        // `month()` is always in 1..=12.
        Month::try_from(self.date.month() as u8).unwrap_or(Month::January)
    }
}
