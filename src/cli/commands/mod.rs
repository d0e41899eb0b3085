pub mod auth;
pub mod bill;
pub mod config;
pub mod inventory;
pub mod report;
pub mod selection;
pub mod sync;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "login",
    "logout",
    "inventory",
    "select",
    "selection",
    "bill",
    "report",
    "sync",
    "config",
    "clear",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(auth::definitions());
    commands.extend(inventory::definitions());
    commands.extend(selection::definitions());
    commands.extend(bill::definitions());
    commands.extend(report::definitions());
    commands.extend(sync::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}
