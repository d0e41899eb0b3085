use std::path::PathBuf;

use billdesk_config::CONFIG_KEYS;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::desk::DeskSettings;

/// Keys read only when the desk is opened.
const RESTART_KEYS: &[&str] = &["storage", "data_dir", "workbook_path", "image_dir", "seed_inventory"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change persisted settings",
        "config [show] | config set <key> <value>",
        Access::Admin,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => set(context, key, &value.join(" ")),
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config set <key> <value> (keys: {})",
            CONFIG_KEYS.join(", ")
        ))),
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".into())
}

fn show(context: &ShellContext) {
    let config = &context.config;
    let base = context.config_manager.base_dir();
    output::section("Configuration");
    output::two_column(&[
        ("base_dir", base.display().to_string()),
        ("config_file", context.config_manager.config_path().display().to_string()),
        ("currency_symbol", config.currency_symbol.clone()),
        ("default_tax_rate", config.default_tax_rate.to_string()),
        ("storage", config.storage.to_string()),
        ("strict_dates", config.strict_dates.to_string()),
        ("bill_number_attempts", config.bill_number_attempts.to_string()),
        ("seed_inventory", config.seed_inventory.to_string()),
        ("ui_color_enabled", config.ui_color_enabled.to_string()),
        ("data_dir", config.resolve_data_dir(base).display().to_string()),
        ("workbook_path", display_path(&config.workbook_path)),
        ("image_dir", config.resolve_image_dir(base).display().to_string()),
    ]);
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    context.config.set(key, value)?;
    context.persist_config()?;
    context.desk.apply_settings(DeskSettings::from_config(&context.config));
    context.apply_output_preferences();
    output::success(format!("{key} updated."));
    if RESTART_KEYS.contains(&key) {
        output::hint("This setting takes effect the next time the shell starts.");
    }
    Ok(())
}
