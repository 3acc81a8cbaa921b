use serde::{Deserialize, Serialize};

use super::expense::Expense;

/// Value that disables a category or month option, as offered by the filter
/// dropdowns. Compared case-sensitively, so a category named `all` stays filterable.
pub const ALL_SENTINEL: &str = "All";

/// How the category option of a filter compares against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatch {
    /// Case-sensitive equality.
    #[default]
    Exact,
    /// Case-insensitive substring.
    Contains,
}

/// Narrows a ledger query. Unset options match everything; set options combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub month: Option<String>,
    pub text: Option<String>,
    pub category_match: CategoryMatch,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn containing(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category_match(mut self, mode: CategoryMatch) -> Self {
        self.category_match = mode;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.matches_category(expense) && self.matches_month(expense) && self.matches_text(expense)
    }

    fn matches_category(&self, expense: &Expense) -> bool {
        let Some(wanted) = active(&self.category) else {
            return true;
        };
        match self.category_match {
            CategoryMatch::Exact => expense.category() == wanted,
            CategoryMatch::Contains => expense
                .category()
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
        }
    }

    fn matches_month(&self, expense: &Expense) -> bool {
        match active(&self.month) {
            Some(wanted) => expense.month().name().eq_ignore_ascii_case(wanted.trim()),
            None => true,
        }
    }

    fn matches_text(&self, expense: &Expense) -> bool {
        let Some(needle) = self.text.as_deref() else {
            return true;
        };
        let needle = needle.to_lowercase();
        expense.category().to_lowercase().contains(&needle)
            || expense.date().to_string().contains(&needle)
    }
}

fn active(option: &Option<String>) -> Option<&str> {
    option
        .as_deref()
        .filter(|value| *value != ALL_SENTINEL)
}
