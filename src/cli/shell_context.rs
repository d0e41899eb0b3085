//! Shared runtime state for the admin shell.

use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;

use billdesk_config::{resolve_base_dir, Config, ConfigManager};
use billdesk_core::Clock;
use billdesk_domain::SelectionSet;

use crate::{desk::BillingDesk, errors::CliError};

use super::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    system_clock::SystemClock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Commands come from stdin; nothing prompts.
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub desk: BillingDesk,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub theme: ColorfulTheme,
    /// Items picked for the next bill. Cleared on logout and after a bill is issued.
    pub selection: SelectionSet,
    pub authenticated: bool,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, resolve_base_dir(), Arc::new(SystemClock))
    }

    pub fn with_base_dir(
        mode: CliMode,
        base_dir: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base_dir)?;
        let config = config_manager.load()?;
        let desk = BillingDesk::open(&config, config_manager.base_dir(), clock)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let context = Self {
            mode,
            registry,
            desk,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            selection: SelectionSet::new(),
            authenticated: false,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            plain_mode: self.mode == CliMode::Script || !self.config.ui_color_enabled,
        });
    }

    pub fn prompt(&self) -> String {
        let mut prompt = String::from("billdesk");
        if self.authenticated {
            prompt.push_str("(admin)");
        }
        if !self.selection.is_empty() {
            prompt.push_str(&format!("[{}]", self.selection.len()));
        }
        prompt.push_str("> ");
        prompt
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}
