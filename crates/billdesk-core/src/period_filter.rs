//! Selects bills whose issue date falls inside a calendar period.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use billdesk_domain::{Bill, PeriodWindow, ReportPeriod, ALL_TIME_LABEL};

use crate::CoreError;

/// How the filter treats bills whose stored date cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateValidation {
    /// Exclude the bill from every period-scoped result and record it in `skipped`.
    #[default]
    Lenient,
    /// Fail the whole filter with a validation error.
    Strict,
}

/// Bills matching a period plus the label describing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodFilter {
    pub filtered: Vec<Bill>,
    pub label: String,
    pub window: Option<PeriodWindow>,
    /// Bill numbers excluded because their date did not parse.
    pub skipped: Vec<String>,
}

/// Returns the bills of `period` containing `reference`, in input order.
///
/// `ReportPeriod::All` returns every bill without looking at dates.
pub fn filter_by_period(
    bills: &[Bill],
    period: ReportPeriod,
    reference: NaiveDate,
    validation: DateValidation,
) -> Result<PeriodFilter, CoreError> {
    let Some(window) = PeriodWindow::containing(period, reference) else {
        if period == ReportPeriod::All {
            return Ok(PeriodFilter {
                filtered: bills.to_vec(),
                label: ALL_TIME_LABEL.to_string(),
                window: None,
                skipped: Vec::new(),
            });
        }
        return Err(CoreError::Validation(format!(
            "reference date {reference} is outside the supported range"
        )));
    };

    let mut filtered = Vec::new();
    let mut skipped = Vec::new();
    for bill in bills {
        match bill.issue_date() {
            Some(date) if window.contains(date) => filtered.push(bill.clone()),
            Some(_) => {}
            None if validation == DateValidation::Strict => {
                return Err(CoreError::Validation(format!(
                    "bill {} has an unparsable date `{}`",
                    bill.bill_number, bill.date
                )));
            }
            None => {
                warn!(
                    bill = %bill.bill_number,
                    date = %bill.date,
                    "excluding bill with unparsable date from period report"
                );
                skipped.push(bill.bill_number.clone());
            }
        }
    }

    Ok(PeriodFilter {
        filtered,
        label: window.label(),
        window: Some(window),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_domain::LineItem;

    fn bill(number: &str, date: &str) -> Bill {
        Bill {
            bill_number: number.into(),
            date: date.into(),
            customer_name: "Alice".into(),
            customer_address: String::new(),
            customer_phone: String::new(),
            items: vec![LineItem::new("Widget", 1.0, 10.0)],
            subtotal: 10.0,
            tax_amount: 0.0,
            total: 10.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn numbers(result: &PeriodFilter) -> Vec<&str> {
        result
            .filtered
            .iter()
            .map(|bill| bill.bill_number.as_str())
            .collect()
    }

    #[test]
    fn all_returns_everything_including_bad_dates() {
        let bills = vec![bill("a", "2024-03-10"), bill("b", "garbage")];
        let result =
            filter_by_period(&bills, ReportPeriod::All, date(2000, 1, 1), DateValidation::Strict)
                .unwrap();
        assert_eq!(result.filtered, bills);
        assert_eq!(result.label, "All Time");
        assert!(result.window.is_none());
    }

    #[test]
    fn year_boundaries_are_inclusive() {
        let bills = vec![
            bill("first", "2024-01-01"),
            bill("last", "2024-12-31"),
            bill("next", "2025-01-01"),
        ];
        let result = filter_by_period(
            &bills,
            ReportPeriod::Year,
            date(2024, 6, 1),
            DateValidation::Lenient,
        )
        .unwrap();
        assert_eq!(numbers(&result), vec!["first", "last"]);
        assert_eq!(result.label, "2024");
    }

    #[test]
    fn lenient_mode_excludes_unparsable_dates() {
        let bills = vec![bill("good", "2024-03-10"), bill("bad", "10th March")];
        let result = filter_by_period(
            &bills,
            ReportPeriod::Month,
            date(2024, 3, 1),
            DateValidation::Lenient,
        )
        .unwrap();
        assert_eq!(numbers(&result), vec!["good"]);
        assert_eq!(result.skipped, vec!["bad".to_string()]);
    }

    #[test]
    fn strict_mode_rejects_unparsable_dates() {
        let bills = vec![bill("good", "2024-03-10"), bill("bad", "")];
        let err = filter_by_period(
            &bills,
            ReportPeriod::Day,
            date(2024, 3, 10),
            DateValidation::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(message) if message.contains("bad")));
    }

    #[test]
    fn timestamp_dates_match_by_calendar_day() {
        let bills = vec![bill("stamp", "2024-03-10T22:15:00Z")];
        let result = filter_by_period(
            &bills,
            ReportPeriod::Day,
            date(2024, 3, 10),
            DateValidation::Lenient,
        )
        .unwrap();
        assert_eq!(numbers(&result), vec!["stamp"]);
    }
}
