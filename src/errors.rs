use thiserror::Error;

use billdesk_config::ConfigError;
use billdesk_core::{CoreError, ErrorKind};

/// Failures surfaced by [`crate::desk::BillingDesk`].
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DeskError {
    /// Classification of store and validation failures; `None` for setup problems.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DeskError::Core(err) => Some(err.kind()),
            DeskError::Config(_) | DeskError::Configuration(_) => None,
        }
    }
}

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Desk(#[from] DeskError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Desk(DeskError::Config(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Desk(DeskError::Core(err))
    }
}
