use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colors and no icons; used for scripts and when colors are disabled.
    pub plain_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    if prefs.plain_mode {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

pub(crate) fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let (label, icon) = match kind {
        MessageKind::Info => ("INFO:", "i"),
        MessageKind::Success => ("OK:", "✔"),
        MessageKind::Warning => ("WARNING:", "⚠"),
        MessageKind::Error => ("ERROR:", "✖"),
        MessageKind::Hint => ("hint:", "›"),
        MessageKind::Section => return section_text(&text, prefs),
    };

    if prefs.plain_mode {
        return format!("{label} {text}");
    }
    let base = format!("{icon} {text}");
    match kind {
        MessageKind::Success => base.green().to_string(),
        MessageKind::Warning => base.yellow().to_string(),
        MessageKind::Error => base.red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        _ => base,
    }
}

fn section_text(title: &str, prefs: &OutputPreferences) -> String {
    let base = format!("=== {} ===", title.trim());
    if prefs.plain_mode {
        base
    } else {
        base.bold().to_string()
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message, &current_preferences());
    if kind == MessageKind::Section {
        println!("\n{formatted}");
    } else {
        println!("{formatted}");
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Aligned `label  value` lines.
pub fn two_column(entries: &[(&str, String)]) {
    let width = entries.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in entries {
        println!("  {label:<width$}  {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_uses_text_labels() {
        let prefs = OutputPreferences { plain_mode: true };
        assert_eq!(styled(MessageKind::Success, "saved", &prefs), "OK: saved");
        assert_eq!(styled(MessageKind::Error, "boom", &prefs), "ERROR: boom");
        assert_eq!(styled(MessageKind::Section, " Bills ", &prefs), "=== Bills ===");
    }
}
