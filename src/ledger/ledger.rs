use rust_decimal::Decimal;

use crate::errors::ValidationError;

use super::{
    date_format::{parse_amount, DateFormat},
    expense::Expense,
    filter::ExpenseFilter,
};

/// Ordered, append-only store of expenses for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    expenses: Vec<Expense>,
    date_format: DateFormat,
}

impl Ledger {
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            expenses: Vec::new(),
            date_format,
        }
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    /// Switches the pattern used for future input and for the on-disk date field.
    pub fn set_date_format(&mut self, date_format: DateFormat) {
        self.date_format = date_format;
    }

    /// Validates raw input and appends the resulting expense. Nothing is
    /// appended when the date or the amount fails to parse, or when the amount
    /// would push the running total out of range.
    pub fn add(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
        description: &str,
    ) -> Result<&Expense, ValidationError> {
        let date = self.date_format.parse(date)?;
        let parsed = parse_amount(amount)?;
        if self
            .expenses
            .iter()
            .try_fold(parsed, |sum, expense| sum.checked_add(expense.amount()))
            .is_none()
        {
            return Err(ValidationError::InvalidAmount {
                input: amount.to_string(),
            });
        }
        self.push(Expense::new(date, category, parsed, description));
        tracing::debug!(count = self.expenses.len(), "expense added");
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn push(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Drops every record, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.expenses.len();
        self.expenses.clear();
        tracing::debug!(removed, "ledger cleared");
        removed
    }

    /// Lazily yields matching records in insertion order. Each call evaluates
    /// against the current contents.
    pub fn query<'a>(&'a self, filter: &'a ExpenseFilter) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses
            .iter()
            .filter(move |expense| filter.matches(expense))
    }

    pub fn total(&self) -> Decimal {
        total(&self.expenses)
    }

    pub fn subtotal(&self, filter: &ExpenseFilter) -> Decimal {
        total(self.query(filter))
    }

    /// Per-category sums in the order each category first appears.
    pub fn category_totals(&self) -> Vec<(String, Decimal)> {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        for expense in &self.expenses {
            match totals
                .iter_mut()
                .find(|(category, _)| category == expense.category())
            {
                Some((_, sum)) => *sum = sum.saturating_add(expense.amount()),
                None => totals.push((expense.category().to_string(), expense.amount())),
            }
        }
        totals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Sums the amounts of the given records; an empty sequence yields zero.
/// Sums beyond the `Decimal` range clamp to its bounds.
pub fn total<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    records
        .into_iter()
        .fold(Decimal::ZERO, |sum, expense| sum.saturating_add(expense.amount()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CategoryMatch;
    use chrono::NaiveDate;

    fn iso_ledger() -> Ledger {
        Ledger::new(DateFormat::Iso)
    }

    #[test]
    fn add_appends_and_returns_record() {
        let mut ledger = iso_ledger();
        let added = ledger
            .add("2024-01-15", "Food", "250.50", "lunch")
            .unwrap()
            .clone();
        assert_eq!(added.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(added.category(), "Food");
        assert_eq!(added.amount(), Decimal::new(25050, 2));
        assert_eq!(added.description(), "lunch");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn add_rejects_bad_input_without_appending() {
        let mut ledger = iso_ledger();
        let err = ledger.add("15-01-2024", "Food", "10", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        let err = ledger.add("2024-01-15", "Food", "ten", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_accepts_empty_category_and_zero_or_negative_amounts() {
        let mut ledger = iso_ledger();
        ledger.add("2024-01-15", "", "0", "").unwrap();
        ledger.add("2024-01-16", "Refund", "-12.5", "").unwrap();
        assert_eq!(ledger.total(), Decimal::new(-125, 1));
    }

    #[test]
    fn query_reflects_current_state() {
        let mut ledger = iso_ledger();
        let filter = ExpenseFilter::new().by_category("Food");
        ledger.add("2024-01-01", "Food", "1", "").unwrap();
        assert_eq!(ledger.query(&filter).count(), 1);
        ledger.add("2024-01-02", "Food", "2", "").unwrap();
        assert_eq!(ledger.query(&filter).count(), 2);
        ledger.clear();
        assert_eq!(ledger.query(&filter).count(), 0);
    }

    #[test]
    fn subtotal_sums_only_matching_records() {
        let mut ledger = iso_ledger();
        ledger.add("2024-01-01", "Food", "10", "").unwrap();
        ledger.add("2024-01-02", "Bills", "90", "").unwrap();
        ledger.add("2024-01-03", "Fast food", "5", "").unwrap();
        let filter = ExpenseFilter::new()
            .by_category("food")
            .with_category_match(CategoryMatch::Contains);
        assert_eq!(ledger.subtotal(&filter), Decimal::from(15));
        assert_eq!(ledger.total(), Decimal::from(105));
    }

    #[test]
    fn category_totals_keep_first_seen_order() {
        let mut ledger = iso_ledger();
        ledger.add("2024-01-01", "Transport", "3", "").unwrap();
        ledger.add("2024-01-02", "Food", "4", "").unwrap();
        ledger.add("2024-01-03", "Transport", "5", "").unwrap();
        assert_eq!(
            ledger.category_totals(),
            vec![
                ("Transport".to_string(), Decimal::from(8)),
                ("Food".to_string(), Decimal::from(4)),
            ]
        );
    }

    #[test]
    fn add_rejects_amount_that_overflows_running_total() {
        let mut ledger = iso_ledger();
        ledger
            .add("2024-01-01", "Big", "79228162514264337593543950335", "")
            .unwrap();
        let err = ledger.add("2024-01-02", "Food", "1", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), Decimal::MAX);
    }

    #[test]
    fn totals_of_loaded_records_clamp_instead_of_panicking() {
        let mut ledger = iso_ledger();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ledger.push(Expense::new(date, "Big", Decimal::MAX, ""));
        ledger.push(Expense::new(date, "Big", Decimal::ONE, ""));
        assert_eq!(ledger.total(), Decimal::MAX);
        assert_eq!(
            ledger.subtotal(&ExpenseFilter::new().by_category("Big")),
            Decimal::MAX
        );
        assert_eq!(
            ledger.category_totals(),
            vec![("Big".to_string(), Decimal::MAX)]
        );
    }

    #[test]
    fn clear_reports_removed_count() {
        let mut ledger = iso_ledger();
        ledger.add("2024-01-01", "Food", "1", "").unwrap();
        ledger.add("2024-01-02", "Food", "1", "").unwrap();
        assert_eq!(ledger.clear(), 2);
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Decimal::ZERO);
    }
}
