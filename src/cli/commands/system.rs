use std::io::stdout;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("clear", "Clear the screen", "clear", Access::Public, cmd_clear),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            Access::Public,
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", Access::Public, cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", Access::Public, cmd_exit),
    ]
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.can_prompt() {
        return Ok(());
    }
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("BillDesk");
    output::two_column(&build_info::current().rows());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
