use std::{fs, path::Path};

use billdesk_domain::{Displayable, Identifiable, InventoryItem, InventoryUpdate, NewInventoryItem};

use crate::cli::args::{parse_amount, parse_args};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "inventory <list|add|edit|remove|image> ...";
const ADD_USAGE: &str = "inventory add <name> <price> [--description D] [--image REF]";
const EDIT_USAGE: &str =
    "inventory edit <id> [--name N] [--price P] [--description D] [--image REF]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "inventory",
        "List and maintain the product catalog",
        USAGE,
        Access::Admin,
        cmd_inventory,
    )]
}

fn cmd_inventory(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = args.split_first().map_or(("list", &[][..]), |(sub, rest)| (*sub, rest));
    match sub.to_ascii_lowercase().as_str() {
        "list" | "ls" => list(context),
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "remove" | "rm" => remove(context, rest),
        "image" => attach_image(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown inventory action `{other}`; usage: {USAGE}"
        ))),
    }
}

pub(crate) fn render_items(context: &ShellContext, items: &[InventoryItem]) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("ID").truncate_at(12),
        TableColumn::left("Name"),
        TableColumn::right("Price"),
        TableColumn::left("Description").truncate_at(32),
        TableColumn::left("Image").truncate_at(24),
    ]);
    for item in items {
        table.push(vec![
            item.id.clone(),
            item.name.clone(),
            context.money(item.unit_price),
            item.description.clone().unwrap_or_default(),
            item.image_ref.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

fn list(context: &ShellContext) -> CommandResult {
    let items = context.desk.inventory()?;
    output::section(format!("Inventory ({} items)", items.len()));
    if items.is_empty() {
        output::info("No inventory items yet. Add one with `inventory add`.");
        return Ok(());
    }
    println!("{}", render_items(context, &items));
    Ok(())
}

fn add(context: &ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["--description", "--image"], &[])?;
    let (Some(name), Some(price)) = (parsed.positional(0), parsed.positional(1)) else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    let mut item = NewInventoryItem::new(name, parse_amount("price", price)?);
    item.description = parsed.option("--description").map(str::to_string);
    item.image_ref = parsed.option("--image").map(str::to_string);

    let created = context.desk.add_item(item)?;
    output::success(format!(
        "Added {} at {} (id {}).",
        created.name,
        context.money(created.unit_price),
        created.id
    ));
    Ok(())
}

fn edit(context: &ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["--name", "--price", "--description", "--image"], &[])?;
    let Some(id) = parsed.positional(0) else {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    };
    let update = InventoryUpdate {
        name: parsed.option("--name").map(str::to_string),
        unit_price: parsed
            .option("--price")
            .map(|raw| parse_amount("price", raw))
            .transpose()?,
        description: parsed.option("--description").map(str::to_string),
        image_ref: parsed.option("--image").map(str::to_string),
    };

    let updated = context.desk.update_item(id, update)?;
    output::success(format!(
        "Updated {} ({}).",
        updated.name,
        context.money(updated.unit_price)
    ));
    Ok(())
}

fn remove(context: &ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: inventory remove <id>".into(),
        ));
    };
    let label = context
        .desk
        .inventory()?
        .into_iter()
        .find(|item| item.key() == *id)
        .map(|item| item.display_label())
        .unwrap_or_else(|| format!("`{id}`"));
    if !context.confirm(&format!("Delete {label}?"))? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    context.desk.remove_item(id)?;
    output::success(format!("Removed {label}."));
    Ok(())
}

fn attach_image(context: &ShellContext, args: &[&str]) -> CommandResult {
    let [id, file] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: inventory image <id> <file>".into(),
        ));
    };
    let path = Path::new(file);
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");

    let updated = context.desk.attach_image(id, file_name, &bytes)?;
    output::success(format!(
        "Image stored for {}: {}",
        updated.name,
        updated.image_ref.unwrap_or_default()
    ));
    Ok(())
}
