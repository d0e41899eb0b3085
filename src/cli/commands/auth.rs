use std::env;

use tracing::{info, warn};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry};
use crate::errors::DeskError;

/// Environment variable holding the admin password.
pub const PASSWORD_ENV: &str = "BILLDESK_APP_PASSWORD";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Unlock admin commands",
            "login [password]",
            Access::Public,
            cmd_login,
        ),
        CommandEntry::new(
            "logout",
            "End the admin session and drop the selection",
            "logout",
            Access::Public,
            cmd_logout,
        ),
    ]
}

fn expected_password() -> Result<String, CommandError> {
    env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            CommandError::Desk(DeskError::Configuration(format!(
                "{PASSWORD_ENV} is not set"
            )))
        })
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.authenticated {
        output::info("Already logged in.");
        return Ok(());
    }
    let expected = expected_password()?;

    let supplied = match args.first() {
        Some(password) => password.to_string(),
        None if context.can_prompt() => cli_io::prompt_password(&context.theme, "Password")?,
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: login <password>".into(),
            ))
        }
    };

    if supplied != expected {
        warn!("rejected admin login");
        return Err(CommandError::InvalidPassword);
    }
    context.authenticated = true;
    info!("admin logged in");
    output::success("Logged in.");
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.authenticated {
        output::info("Not logged in.");
        return Ok(());
    }
    context.authenticated = false;
    context.selection.clear();
    output::success("Logged out.");
    Ok(())
}
