//! Sales report aggregation over a filtered period.

use chrono::NaiveDate;
use serde::Serialize;

use billdesk_domain::{Bill, PeriodWindow, ReportPeriod};

use crate::{
    period_filter::{filter_by_period, DateValidation},
    CoreError,
};

/// Summary of the bills issued in a period, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub label: String,
    pub window: Option<PeriodWindow>,
    pub bills: Vec<Bill>,
    pub bill_count: usize,
    pub subtotal: f64,
    pub tax: f64,
    pub total_sales: f64,
    pub skipped: Vec<String>,
}

pub struct ReportService;

impl ReportService {
    /// Filters `bills` (in storage order) to the period and totals them.
    pub fn summarize(
        bills: &[Bill],
        period: ReportPeriod,
        reference: NaiveDate,
        validation: DateValidation,
    ) -> Result<SalesReport, CoreError> {
        let result = filter_by_period(bills, period, reference, validation)?;
        let mut bills = result.filtered;
        bills.reverse();

        let (subtotal, tax, total_sales) = bills.iter().fold((0.0, 0.0, 0.0), |acc, bill| {
            (
                acc.0 + bill.subtotal,
                acc.1 + bill.tax_amount,
                acc.2 + bill.total,
            )
        });

        Ok(SalesReport {
            label: result.label,
            window: result.window,
            bill_count: bills.len(),
            bills,
            subtotal,
            tax,
            total_sales,
            skipped: result.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_domain::LineItem;

    fn bill(number: &str, date: &str, total: f64) -> Bill {
        Bill {
            bill_number: number.into(),
            date: date.into(),
            customer_name: "Alice".into(),
            customer_address: String::new(),
            customer_phone: String::new(),
            items: vec![LineItem::new("Widget", 1.0, total)],
            subtotal: total,
            tax_amount: 0.0,
            total,
        }
    }

    #[test]
    fn totals_cover_only_the_period_and_list_newest_first() {
        let bills = vec![
            bill("feb", "2024-02-28", 50.0),
            bill("mar-1", "2024-03-01", 100.0),
            bill("mar-2", "2024-03-20", 25.0),
        ];
        let report = ReportService::summarize(
            &bills,
            ReportPeriod::Month,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            DateValidation::Lenient,
        )
        .unwrap();

        assert_eq!(report.label, "March 2024");
        assert_eq!(report.bill_count, 2);
        assert_eq!(report.total_sales, 125.0);
        assert_eq!(report.bills[0].bill_number, "mar-2");
    }
}
