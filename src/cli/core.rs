//! Dispatch, error reporting and shared helpers for command handlers.

use std::io;

use thiserror::Error;

use billdesk_config::ConfigError;
use billdesk_core::{CoreError, ErrorKind};

use crate::{
    errors::{CliError, DeskError},
    utils::format_money,
};

use super::{io as cli_io, output, registry::Access, shell::parse_command_line};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Login required. Use `login` first.")]
    LoginRequired,
    #[error("Invalid password.")]
    InvalidPassword,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Desk(#[from] DeskError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Desk(DeskError::Core(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Desk(DeskError::Config(err))
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let (handler, access) = (entry.handler, entry.access);
        if access == Access::Admin {
            self.require_auth()?;
        }
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Runs one raw input line through tokenizing and dispatch.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn require_auth(&self) -> CommandResult {
        if self.authenticated {
            Ok(())
        } else {
            Err(CommandError::LoginRequired)
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Asks in interactive mode; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(|err| match err {
            CommandError::Dialoguer(err) => CliError::Prompt(err),
            CommandError::Io(err) => CliError::Io(err),
            other => CliError::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
        })
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_money(&self.config.currency_symbol, amount)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::LoginRequired => {
                output::error(CommandError::LoginRequired);
                output::hint("Try `login <password>`.");
            }
            CommandError::Desk(err) => match err.kind() {
                Some(kind) => {
                    output::error(format!("{kind}: {err}"));
                    if kind == ErrorKind::Upstream {
                        output::hint("The data store could not be reached; nothing was changed.");
                    }
                }
                None => {
                    output::error(&err);
                    output::hint("Check `config show` and the environment.");
                }
            },
            other => output::error(other),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use billdesk_core::FixedClock;

    use super::*;

    fn script_context() -> (ShellContext, TempDir) {
        let dir = TempDir::new().unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
        let context =
            ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf(), Arc::new(clock))
                .unwrap();
        (context, dir)
    }

    #[test]
    fn admin_commands_require_login() {
        let (mut context, _dir) = script_context();
        let result = context.process_line("inventory list");
        assert!(matches!(result, Err(CommandError::LoginRequired)));

        context.authenticated = true;
        assert_eq!(
            context.process_line("inventory list").unwrap(),
            LoopControl::Continue
        );
    }

    #[test]
    fn selection_feeds_bill_creation() {
        let (mut context, _dir) = script_context();
        context.authenticated = true;

        context.process_line("select 1 2").unwrap();
        context.process_line("select 4 1").unwrap();
        assert_eq!(context.selection.len(), 2);

        context
            .process_line("bill create \"Alice Smith\" --phone 555-0100 --tax 10")
            .unwrap();
        assert!(context.selection.is_empty());

        let bills = context.desk.bills().unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].customer_name, "Alice Smith");
        assert_eq!(bills[0].subtotal, 700.0);
        assert_eq!(bills[0].total, 770.0);
        assert_eq!(bills[0].date, "2024-03-10");
    }

    #[test]
    fn unknown_inventory_id_cannot_be_selected() {
        let (mut context, _dir) = script_context();
        context.authenticated = true;

        let err = context.process_line("select missing 1").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Desk(DeskError::Core(CoreError::NotFound(_)))
        ));
        assert!(context.selection.is_empty());
    }

    #[test]
    fn bill_show_is_public_but_create_is_not() {
        let (mut context, _dir) = script_context();
        let err = context.process_line("bill create Alice").unwrap_err();
        assert!(matches!(err, CommandError::LoginRequired));

        let err = context.process_line("bill show BILL-1").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Desk(DeskError::Core(CoreError::NotFound(_)))
        ));
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut context, _dir) = script_context();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }
}
