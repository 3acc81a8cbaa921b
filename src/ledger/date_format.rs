use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The single date pattern a ledger accepts. Formats are never tried in turn:
/// input that does not match the active pattern is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `yyyy-MM-dd`
    #[default]
    Iso,
    /// `dd-MM-yyyy`
    DayMonthYear,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthYear => "%d-%m-%Y",
        }
    }

    /// Human readable pattern shown in prompts and error messages.
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::Iso => "yyyy-MM-dd",
            DateFormat::DayMonthYear => "dd-MM-yyyy",
        }
    }

    pub fn parse(self, input: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(input, self.pattern()).map_err(|_| {
            ValidationError::InvalidDate {
                input: input.to_string(),
                expected: self.label().to_string(),
            }
        })
    }

    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iso" | "yyyy-mm-dd" => Ok(DateFormat::Iso),
            "day_month_year" | "dmy" | "dd-mm-yyyy" => Ok(DateFormat::DayMonthYear),
            other => Err(format!("unknown date format `{other}`")),
        }
    }
}

/// Parses an amount the way interactive input is accepted: surrounding
/// whitespace is ignored and scientific notation is allowed. Digit
/// separators such as `1_000` are rejected.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.contains('_') {
        return Err(invalid());
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_are_not_interchangeable() {
        assert!(DateFormat::Iso.parse("2024-01-15").is_ok());
        assert!(DateFormat::Iso.parse("15-01-2024").is_err());
        assert!(DateFormat::DayMonthYear.parse("15-01-2024").is_ok());
        assert!(DateFormat::DayMonthYear.parse("2024-01-15").is_err());
    }

    #[test]
    fn format_uses_active_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(DateFormat::Iso.format(date), "2024-03-07");
        assert_eq!(DateFormat::DayMonthYear.format(date), "07-03-2024");
    }

    #[test]
    fn invalid_date_reports_expected_pattern() {
        let err = DateFormat::DayMonthYear.parse("yesterday").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                input: "yesterday".into(),
                expected: "dd-MM-yyyy".into(),
            }
        );
    }

    #[test]
    fn amount_accepts_whitespace_negative_and_scientific() {
        assert_eq!(parse_amount(" 250.50 ").unwrap(), Decimal::new(25050, 2));
        assert_eq!(parse_amount("-3").unwrap(), Decimal::from(-3));
        assert_eq!(parse_amount("1e3").unwrap(), Decimal::from(1000));
    }

    #[test]
    fn amount_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("12,50").is_err());
    }

    #[test]
    fn amount_rejects_digit_separators() {
        assert_eq!(
            parse_amount("1_000").unwrap_err(),
            ValidationError::InvalidAmount {
                input: "1_000".into(),
            }
        );
        assert!(parse_amount("1_0e3").is_err());
    }

    #[test]
    fn date_format_from_str_accepts_labels() {
        assert_eq!("ISO".parse::<DateFormat>().unwrap(), DateFormat::Iso);
        assert_eq!(
            "dd-MM-yyyy".parse::<DateFormat>().unwrap(),
            DateFormat::DayMonthYear
        );
        assert!("mm/dd".parse::<DateFormat>().is_err());
    }
}
