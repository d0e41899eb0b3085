use billdesk_core::{selection_total, CoreError};
use billdesk_domain::LineItem;

use crate::cli::args::parse_amount;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Set the quantity of an inventory item for the next bill (0 removes it)",
            "select <id> <quantity>",
            Access::Admin,
            cmd_select,
        ),
        CommandEntry::new(
            "selection",
            "Show or clear the items picked for the next bill",
            "selection [show|clear]",
            Access::Admin,
            cmd_selection,
        ),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, quantity] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: select <id> <quantity>".into(),
        ));
    };
    let quantity = parse_amount("quantity", quantity)?;
    let item = context
        .desk
        .inventory()?
        .into_iter()
        .find(|item| item.id == *id)
        .ok_or_else(|| CoreError::NotFound(format!("inventory item `{id}`")))?;

    context.selection.set(item.id.clone(), quantity);
    if quantity > 0.0 {
        output::success(format!("{} × {} selected.", quantity, item.name));
    } else {
        output::info(format!("{} removed from the selection.", item.name));
    }
    Ok(())
}

fn cmd_selection(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|sub| sub.to_ascii_lowercase()).as_deref() {
        None | Some("show") => show(context),
        Some("clear") => {
            context.selection.clear();
            output::success("Selection cleared.");
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown selection action `{other}`; usage: selection [show|clear]"
        ))),
    }
}

pub(crate) fn render_lines(context: &ShellContext, items: &[LineItem]) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Item"),
        TableColumn::right("Qty"),
        TableColumn::right("Price"),
        TableColumn::right("Total"),
    ]);
    for item in items {
        table.push(vec![
            item.item_name.clone(),
            item.quantity.to_string(),
            context.money(item.unit_price),
            context.money(item.line_total),
        ]);
    }
    table.render()
}

fn show(context: &ShellContext) -> CommandResult {
    if context.selection.is_empty() {
        output::info("Nothing selected. Use `select <id> <quantity>`.");
        return Ok(());
    }
    let items = context.desk.compose(&context.selection)?;
    output::section("Selection");
    println!("{}", render_lines(context, &items));
    output::two_column(&[("Subtotal", context.money(selection_total(&items)))]);
    Ok(())
}
