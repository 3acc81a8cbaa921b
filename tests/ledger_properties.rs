mod common;

use expense_ledger::{
    errors::ValidationError,
    ledger::{budget_status, total, BudgetStatus, DateFormat, Expense, ExpenseFilter, Ledger},
};
use rust_decimal::Decimal;

#[test]
fn add_then_query_contains_exactly_one_match_and_total_grows() {
    let mut ledger = common::sample_ledger();
    let before = ledger.total();

    let added = ledger
        .add("2024-03-09", "Shopping", "19.99", "socks")
        .unwrap()
        .clone();

    let everything = ExpenseFilter::default();
    let matching = ledger
        .query(&everything)
        .filter(|expense| **expense == added)
        .count();
    assert_eq!(matching, 1);
    assert_eq!(ledger.total(), before + Decimal::new(1999, 2));
}

#[test]
fn category_filter_keeps_insertion_order() {
    let ledger = common::sample_ledger();
    let food = ExpenseFilter::new().by_category("Food");
    let found: Vec<&Expense> = ledger.query(&food).collect();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].description(), "lunch");
    assert_eq!(found[1].amount(), Decimal::new(1225, 2));
}

#[test]
fn total_of_nothing_is_zero() {
    let empty: Vec<Expense> = Vec::new();
    assert_eq!(total(&empty), Decimal::ZERO);
    assert_eq!(Ledger::default().total(), Decimal::ZERO);
}

#[test]
fn total_splits_over_concatenation() {
    let ledger = common::sample_ledger();
    let (head, tail) = ledger.expenses().split_at(1);
    assert_eq!(total(ledger.expenses()), total(head) + total(tail));
}

#[test]
fn month_scenario_from_two_records() {
    let mut ledger = Ledger::new(DateFormat::Iso);
    ledger.add("2024-01-15", "Food", "250.50", "lunch").unwrap();
    ledger
        .add("2024-02-01", "Bills", "1000", "electricity")
        .unwrap();

    let january = ExpenseFilter::new().in_month("January");
    let found: Vec<&Expense> = ledger.query(&january).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category(), "Food");
    assert_eq!(ledger.total(), Decimal::new(125050, 2));
}

#[test]
fn day_month_year_ledger_rejects_iso_input() {
    let mut ledger = Ledger::new(DateFormat::DayMonthYear);
    let err = ledger.add("2024-01-15", "Food", "1", "").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDate { .. }));
    assert!(ledger.add("15-01-2024", "Food", "1", "").is_ok());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn text_search_matches_iso_date_even_for_day_month_year_ledgers() {
    let mut ledger = Ledger::new(DateFormat::DayMonthYear);
    ledger.add("15-01-2024", "Food", "1", "").unwrap();
    let by_iso = ExpenseFilter::new().containing("2024-01");
    assert_eq!(ledger.query(&by_iso).count(), 1);
}

#[test]
fn budget_status_follows_total() {
    let ledger = common::sample_ledger();
    assert_eq!(
        budget_status(ledger.total(), Decimal::from(300)),
        BudgetStatus::Exceeded
    );
    assert_eq!(
        budget_status(ledger.total(), Decimal::from(400)),
        BudgetStatus::Ok
    );
    assert_eq!(budget_status(ledger.total(), Decimal::ZERO), BudgetStatus::Ok);
}
