//! Interactive admin shell over [`crate::desk::BillingDesk`].

pub mod args;
pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod response;
pub mod shell;
pub mod shell_context;
pub mod system_clock;
pub mod table;

pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::{CliMode, ShellContext};
