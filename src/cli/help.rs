use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

fn access_label(access: Access) -> &'static str {
    match access {
        Access::Public => "",
        Access::Admin => "login",
        Access::Mixed => "partly",
    }
}

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Description"),
        TableColumn::left("Access"),
    ]);
    for entry in registry.list() {
        table.push(vec![
            entry.name.to_string(),
            entry.description.to_string(),
            access_label(entry.access).to_string(),
        ]);
    }
    println!("{}", table.render());
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    let access = match entry.access {
        Access::Public => "anyone",
        Access::Admin => "logged-in admin",
        Access::Mixed => "depends on the subcommand",
    };
    output::two_column(&[
        ("description", entry.description.to_string()),
        ("usage", entry.usage.to_string()),
        ("access", access.to_string()),
    ]);
}
