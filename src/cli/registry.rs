use std::collections::HashMap;

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Largest edit distance still offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires a logged-in session.
    Admin,
    /// The handler checks the session per subcommand.
    Mixed,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub access: Access,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        access: Access,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            access,
            handler,
        }
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Closest registered name to a mistyped command.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn suggestions_respect_distance_limit() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("inventory", "", "", Access::Admin, noop));
        registry.register(CommandEntry::new("report", "", "", Access::Admin, noop));

        assert_eq!(registry.suggest("invnetory"), Some("inventory"));
        assert_eq!(registry.suggest("REPROT"), Some("report"));
        assert_eq!(registry.suggest("completely-different"), None);
        assert_eq!(registry.list().len(), 2);
    }
}
