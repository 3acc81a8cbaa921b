//! Line codec for the `date,category,amount,description` format.
//!
//! No header, quoting, or escaping. Only the first three commas split a line,
//! so a description may itself contain commas. Line breaks inside a category or
//! description are written as spaces so that every record stays on one line.

use std::{
    borrow::Cow,
    io::{BufRead, Write},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{CorruptReason, LedgerError, Result},
    ledger::{parse_amount, DateFormat, Expense, Ledger},
};

const FIELD_COUNT: usize = 4;
const SEPARATOR: char = ',';

/// What a load does when it meets a line it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// The whole load fails and no partial ledger is returned.
    #[default]
    Abort,
    /// Bad lines are reported in [`LoadReport::skipped`] and the rest are kept.
    SkipCorrupt,
}

/// A line that was left out of a [`LoadPolicy::SkipCorrupt`] load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptLine {
    /// 1-based line number in the source.
    pub line: usize,
    pub reason: CorruptReason,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub skipped: Vec<CorruptLine>,
}

impl LoadReport {
    pub fn empty(date_format: DateFormat) -> Self {
        Self {
            ledger: Ledger::new(date_format),
            skipped: Vec::new(),
        }
    }
}

pub fn encode_expense(expense: &Expense, date_format: DateFormat) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        date_format.format(expense.date()),
        single_line(expense.category()),
        expense.amount(),
        single_line(expense.description()),
        sep = SEPARATOR,
    )
}

fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn decode_line(line: &str, date_format: DateFormat) -> std::result::Result<Expense, CorruptReason> {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, SEPARATOR).collect();
    if fields.len() < FIELD_COUNT {
        return Err(CorruptReason::FieldCount(fields.len()));
    }
    let date = date_format.parse(fields[0]).map_err(CorruptReason::Invalid)?;
    let amount = parse_amount(fields[2]).map_err(CorruptReason::Invalid)?;
    Ok(Expense::new(date, fields[1], amount, fields[3]))
}

/// Reads every non-blank line of `reader` into a new ledger using `date_format`.
pub fn read_ledger<R: BufRead>(
    reader: R,
    date_format: DateFormat,
    policy: LoadPolicy,
) -> Result<LoadReport> {
    let mut report = LoadReport::empty(date_format);
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;
        match decode_line(&line, date_format) {
            Ok(expense) => report.ledger.push(expense),
            Err(reason) => match policy {
                LoadPolicy::Abort => {
                    return Err(LedgerError::CorruptRecord {
                        line: number,
                        reason,
                    })
                }
                LoadPolicy::SkipCorrupt => {
                    tracing::warn!(line = number, %reason, "skipping corrupt record");
                    report.skipped.push(CorruptLine {
                        line: number,
                        reason,
                        content: line,
                    });
                }
            },
        }
    }
    Ok(report)
}

/// Writes one line per record in insertion order.
pub fn write_ledger<W: Write>(ledger: &Ledger, mut writer: W) -> Result<()> {
    for expense in ledger.iter() {
        writeln!(writer, "{}", encode_expense(expense, ledger.date_format()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn read(input: &str, policy: LoadPolicy) -> Result<LoadReport> {
        read_ledger(Cursor::new(input), DateFormat::Iso, policy)
    }

    #[test]
    fn description_keeps_embedded_commas() {
        let expense = decode_line("2024-01-15,Food,12.5,lunch, with friends", DateFormat::Iso)
            .unwrap();
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.amount(), Decimal::new(125, 1));
        assert_eq!(expense.description(), "lunch, with friends");
    }

    #[test]
    fn empty_description_is_allowed() {
        let expense = decode_line("2024-01-15,Food,3,", DateFormat::Iso).unwrap();
        assert_eq!(expense.description(), "");
    }

    #[test]
    fn two_fields_are_corrupt() {
        let err = decode_line("2024-01-15,Food", DateFormat::Iso).unwrap_err();
        assert_eq!(err, CorruptReason::FieldCount(2));
    }

    #[test]
    fn bad_amount_is_corrupt() {
        let err = decode_line("2024-01-15,Food,abc,x", DateFormat::Iso).unwrap_err();
        assert!(matches!(
            err,
            CorruptReason::Invalid(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn encode_uses_ledger_date_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let expense = Expense::new(date, "Bills", Decimal::from(1000), "electricity");
        assert_eq!(
            encode_expense(&expense, DateFormat::Iso),
            "2024-02-01,Bills,1000,electricity"
        );
        assert_eq!(
            encode_expense(&expense, DateFormat::DayMonthYear),
            "01-02-2024,Bills,1000,electricity"
        );
    }

    #[test]
    fn line_breaks_in_text_fields_are_written_as_spaces() {
        let mut ledger = Ledger::new(DateFormat::Iso);
        ledger
            .add("2024-01-15", "Eating\nout", "12", "first line\r\nsecond\rthird")
            .unwrap();
        let mut buffer = Vec::new();
        write_ledger(&ledger, &mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(written, "2024-01-15,Eating out,12,first line second third\n");

        let report = read_ledger(Cursor::new(written), DateFormat::Iso, LoadPolicy::Abort).unwrap();
        assert_eq!(report.ledger.len(), 1);
        assert_eq!(report.ledger.expenses()[0].category(), "Eating out");
    }

    #[test]
    fn abort_policy_reports_line_number() {
        let input = "2024-01-01,Food,1,a\n\n2024-01-02,Food\n2024-01-03,Food,3,c\n";
        let err = read(input, LoadPolicy::Abort).unwrap_err();
        match err {
            LedgerError::CorruptRecord { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, CorruptReason::FieldCount(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn skip_policy_keeps_good_lines() {
        let input = "2024-01-01,Food,1,a\nnot a record\n2024-01-03,Food,3,c\n";
        let report = read(input, LoadPolicy::SkipCorrupt).unwrap();
        assert_eq!(report.ledger.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.skipped[0].content, "not a record");
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let input = "2024-01-01,Food,1,a\r\n\r\n2024-01-02,Bills,2,b\r\n";
        let report = read(input, LoadPolicy::Abort).unwrap();
        assert_eq!(report.ledger.len(), 2);
        assert_eq!(report.ledger.expenses()[1].description(), "b");
    }

    #[test]
    fn write_emits_one_line_per_record() {
        let mut ledger = Ledger::new(DateFormat::Iso);
        ledger.add("2024-01-15", "Food", "250.50", "lunch").unwrap();
        ledger.add("2024-02-01", "Bills", "1000", "electricity").unwrap();
        let mut buffer = Vec::new();
        write_ledger(&ledger, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "2024-01-15,Food,250.50,lunch\n2024-02-01,Bills,1000,electricity\n"
        );
    }
}
