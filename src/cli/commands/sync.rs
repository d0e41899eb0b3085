use billdesk_sheets::{FileWorkbook, SheetStore, SyncScope};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::errors::DeskError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "sync",
        "Overwrite the workbook sheets with the local bills and inventory",
        "sync <bills|inventory|all>",
        Access::Admin,
        cmd_sync,
    )]
}

fn cmd_sync(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let scope = match args {
        [] => SyncScope::All,
        [scope] => scope.parse::<SyncScope>()?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: sync <bills|inventory|all>".into(),
            ))
        }
    };
    let path = context.config.workbook_path.clone().ok_or_else(|| {
        DeskError::Configuration("set `workbook_path` before syncing".into())
    })?;

    let mirror = SheetStore::new(FileWorkbook::new(path.clone()));
    let summary = context.desk.sync_to(&mirror, scope)?;

    output::success(format!("Synced {scope} to {}.", path.display()));
    let mut rows = Vec::new();
    if let Some(count) = summary.bills {
        rows.push(("Bills", count.to_string()));
    }
    if let Some(count) = summary.inventory {
        rows.push(("Inventory items", count.to_string()));
    }
    output::two_column(&rows);
    Ok(())
}
