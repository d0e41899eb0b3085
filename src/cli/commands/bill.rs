use serde::Serialize;

use billdesk_domain::{Bill, CustomerDetails, Displayable};

use crate::cli::args::{parse_amount, parse_args};
use crate::cli::commands::selection::render_lines;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::cli::response::ApiResponse;
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "bill <create|list|show> ...";
const CREATE_USAGE: &str = "bill create <customer name> [--address A] [--phone P] [--tax RATE]";

#[derive(Serialize)]
struct BillPayload<'a> {
    bill: &'a Bill,
}

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Issue a bill from the selection, list bills, or show one (show needs no login)",
        USAGE,
        Access::Mixed,
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = args.split_first().map_or(("list", &[][..]), |(sub, rest)| (*sub, rest));
    match sub.to_ascii_lowercase().as_str() {
        "create" | "new" => {
            context.require_auth()?;
            create(context, rest)
        }
        "list" | "ls" => {
            context.require_auth()?;
            list(context)
        }
        "show" => show(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill action `{other}`; usage: {USAGE}"
        ))),
    }
}

fn create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["--address", "--phone", "--tax"], &[])?;
    if parsed.positional.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {CREATE_USAGE}"
        )));
    }
    let customer = CustomerDetails::new(parsed.positional.join(" "))
        .with_address(parsed.option("--address").unwrap_or_default())
        .with_phone(parsed.option("--phone").unwrap_or_default());
    let tax_rate = parsed
        .option("--tax")
        .map(|raw| parse_amount("tax rate", raw))
        .transpose()?;

    let bill = context.desk.issue_bill(&customer, &context.selection, tax_rate)?;
    context.selection.clear();

    output::success(format!("Bill saved: {}", bill.display_label()));
    print_bill(context, &bill);
    Ok(())
}

fn list(context: &ShellContext) -> CommandResult {
    let bills = context.desk.bills()?;
    output::section(format!("Bills ({})", bills.len()));
    if bills.is_empty() {
        output::info("No bills issued yet.");
        return Ok(());
    }
    println!("{}", render_bills(context, &bills));
    Ok(())
}

pub(crate) fn render_bills(context: &ShellContext, bills: &[Bill]) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Bill No"),
        TableColumn::left("Date"),
        TableColumn::left("Customer").truncate_at(24),
        TableColumn::right("Items"),
        TableColumn::right("Total"),
    ]);
    for bill in bills {
        table.push(vec![
            bill.bill_number.clone(),
            display_date(bill),
            bill.customer_name.clone(),
            bill.items.len().to_string(),
            context.money(bill.total),
        ]);
    }
    table.render()
}

fn show(context: &ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[], &["--json"])?;
    let [number] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill show <bill number> [--json]".into(),
        ));
    };

    if parsed.has_switch("--json") {
        let body = match context.desk.bill(number) {
            Ok(bill) => ApiResponse::ok(BillPayload { bill: &bill }).to_json()?,
            Err(err) => ApiResponse::<BillPayload>::failure(err.to_string()).to_json()?,
        };
        println!("{body}");
        return Ok(());
    }

    let bill = context.desk.bill(number)?;
    print_bill(context, &bill);
    Ok(())
}

fn print_bill(context: &ShellContext, bill: &Bill) {
    output::section(format!("Bill {}", bill.bill_number));
    let mut header = vec![
        ("Date", display_date(bill)),
        ("Customer", bill.customer_name.clone()),
    ];
    if !bill.customer_address.is_empty() {
        header.push(("Address", bill.customer_address.clone()));
    }
    if !bill.customer_phone.is_empty() {
        header.push(("Phone", bill.customer_phone.clone()));
    }
    output::two_column(&header);
    println!();
    println!("{}", render_lines(context, &bill.items));
    println!();
    let totals = bill.totals();
    output::two_column(&[
        ("Subtotal", context.money(totals.subtotal)),
        ("Tax", context.money(totals.tax_amount)),
        ("Total", context.money(totals.total)),
    ]);
}

/// `dd Mon yyyy`, or the stored text when it does not parse.
pub(crate) fn display_date(bill: &Bill) -> String {
    bill.issue_date()
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| bill.date.clone())
}
