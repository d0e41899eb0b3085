//! Calendar periods used by the sales report.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Enumerates the report period selector values.
pub enum ReportPeriod {
    #[default]
    All,
    Day,
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 5] = [
        ReportPeriod::All,
        ReportPeriod::Day,
        ReportPeriod::Week,
        ReportPeriod::Month,
        ReportPeriod::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportPeriod::All => "all",
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown period `{}` (expected all, day, week, month or year)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for ReportPeriod {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ReportPeriod::All),
            "day" => Ok(ReportPeriod::Day),
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            "year" => Ok(ReportPeriod::Year),
            _ => Err(UnknownPeriod(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Closed calendar interval `[start, end]` for a period-scoped report.
pub struct PeriodWindow {
    pub period: ReportPeriod,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Returns the window of `period` containing `reference`.
    ///
    /// `ReportPeriod::All` is unbounded and has no window. `None` is also
    /// returned when the window would leave chrono's supported date range.
    pub fn containing(period: ReportPeriod, reference: NaiveDate) -> Option<Self> {
        let (start, end) = match period {
            ReportPeriod::All => return None,
            ReportPeriod::Day => (reference, reference),
            ReportPeriod::Week => {
                let offset = reference.weekday().num_days_from_monday() as i64;
                let start = reference.checked_sub_signed(Duration::days(offset))?;
                (start, start.checked_add_signed(Duration::days(6))?)
            }
            ReportPeriod::Month => {
                let start = reference.with_day(1)?;
                let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
                (start, end)
            }
            ReportPeriod::Year => (
                NaiveDate::from_ymd_opt(reference.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(reference.year(), 12, 31)?,
            ),
        };
        Some(Self { period, start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn label(&self) -> String {
        match self.period {
            ReportPeriod::All => ALL_TIME_LABEL.to_string(),
            ReportPeriod::Day => self.start.format("%d %b %Y").to_string(),
            ReportPeriod::Week => format!(
                "{} - {}",
                self.start.format("%d %b"),
                self.end.format("%d %b %Y")
            ),
            ReportPeriod::Month => self.start.format("%B %Y").to_string(),
            ReportPeriod::Year => self.start.format("%Y").to_string(),
        }
    }
}

pub const ALL_TIME_LABEL: &str = "All Time";

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        let window = PeriodWindow::containing(ReportPeriod::Week, date(2024, 3, 7)).unwrap();
        assert_eq!(window.start, date(2024, 3, 4));
        assert_eq!(window.end, date(2024, 3, 10));
        assert_eq!(window.label(), "04 Mar - 10 Mar 2024");

        let sunday = PeriodWindow::containing(ReportPeriod::Week, date(2024, 3, 10)).unwrap();
        assert_eq!(sunday.start, date(2024, 3, 4));
    }

    #[test]
    fn month_window_handles_leap_february() {
        let window = PeriodWindow::containing(ReportPeriod::Month, date(2024, 2, 15)).unwrap();
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.label(), "February 2024");
    }

    #[test]
    fn day_and_year_labels() {
        let day = PeriodWindow::containing(ReportPeriod::Day, date(2024, 3, 10)).unwrap();
        assert_eq!(day.label(), "10 Mar 2024");
        assert!(day.contains(date(2024, 3, 10)));
        assert!(!day.contains(date(2024, 3, 11)));

        let year = PeriodWindow::containing(ReportPeriod::Year, date(2024, 7, 1)).unwrap();
        assert_eq!(year.end, date(2024, 12, 31));
        assert_eq!(year.label(), "2024");
    }

    #[test]
    fn all_period_has_no_window() {
        assert!(PeriodWindow::containing(ReportPeriod::All, date(2024, 1, 1)).is_none());
    }

    #[test]
    fn parses_period_names_case_insensitively() {
        assert_eq!("Week".parse::<ReportPeriod>(), Ok(ReportPeriod::Week));
        assert!("fortnight".parse::<ReportPeriod>().is_err());
    }
}
