use chrono::NaiveDate;
use serde::Serialize;

use billdesk_core::SalesReport;
use billdesk_domain::ReportPeriod;

use crate::cli::args::parse_args;
use crate::cli::commands::bill::render_bills;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::cli::response::ApiResponse;

const USAGE: &str = "report [all|day|week|month|year] [YYYY-MM-DD] [--json]";

#[derive(Serialize)]
struct ReportPayload<'a> {
    report: &'a SalesReport,
}

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Sales totals for the period containing a date (today by default)",
        USAGE,
        Access::Admin,
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[], &["--json"])?;
    let (period, reference) = match parsed.positional.as_slice() {
        [] => (ReportPeriod::All, None),
        [period] => (parse_period(period)?, None),
        [period, date] => (parse_period(period)?, Some(parse_date(date)?)),
        _ => return Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    };

    let report = context.desk.sales_report(period, reference)?;
    if parsed.has_switch("--json") {
        println!("{}", ApiResponse::ok(ReportPayload { report: &report }).to_json()?);
        return Ok(());
    }

    output::section(format!("Sales report: {}", report.label));
    if report.bills.is_empty() {
        output::info("No bills in this period.");
    } else {
        println!("{}", render_bills(context, &report.bills));
        println!();
    }
    output::two_column(&[
        ("Bills", report.bill_count.to_string()),
        ("Subtotal", context.money(report.subtotal)),
        ("Tax", context.money(report.tax)),
        ("Total sales", context.money(report.total_sales)),
    ]);
    if !report.skipped.is_empty() {
        output::warning(format!(
            "{} bill(s) with unreadable dates were left out: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        ));
    }
    Ok(())
}

fn parse_period(raw: &str) -> Result<ReportPeriod, CommandError> {
    raw.parse::<ReportPeriod>().map_err(|_| {
        let known: Vec<&str> = ReportPeriod::ALL.iter().map(|period| period.as_str()).collect();
        CommandError::InvalidArguments(format!(
            "unknown period `{raw}`; expected one of: {}",
            known.join(", ")
        ))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("expected a date as YYYY-MM-DD, got `{raw}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_period_name_parses() {
        for period in ReportPeriod::ALL {
            assert_eq!(parse_period(period.as_str()).unwrap(), period);
        }
    }

    #[test]
    fn unknown_period_lists_the_choices() {
        let err = parse_period("fortnight").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown period `fortnight`; expected one of: all, day, week, month, year"
        );
    }
}
