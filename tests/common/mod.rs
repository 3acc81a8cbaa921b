use expense_ledger::ledger::{DateFormat, Ledger};

/// Ledger holding the three-record Food/Transport/Food history used across suites.
pub fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new(DateFormat::Iso);
    ledger
        .add("2024-01-15", "Food", "250.50", "lunch")
        .expect("valid food expense");
    ledger
        .add("2024-01-20", "Transport", "40", "bus pass")
        .expect("valid transport expense");
    ledger
        .add("2024-02-03", "Food", "12.25", "")
        .expect("valid food expense");
    ledger
}
