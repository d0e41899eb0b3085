//! Splits command arguments into positionals, `--key value` options and
//! bare switches.

use std::collections::HashMap;

use crate::cli::core::CommandError;

#[derive(Debug, Default)]
pub struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'static str, &'a str>,
    switches: Vec<&'static str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.iter().any(|switch| *switch == name)
    }

    pub fn positional(&self, index: usize) -> Option<&'a str> {
        self.positional.get(index).copied()
    }
}

/// `options` take a value; `switches` do not. Unknown `--flags` are rejected.
pub fn parse_args<'a>(
    args: &[&'a str],
    options: &[&'static str],
    switches: &[&'static str],
) -> Result<ParsedArgs<'a>, CommandError> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        if let Some(option) = options.iter().find(|option| **option == arg) {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{option}` needs a value"))
            })?;
            parsed.options.insert(option, value);
        } else if let Some(switch) = switches.iter().find(|switch| **switch == arg) {
            parsed.switches.push(switch);
        } else if arg.starts_with("--") && arg.len() > 2 {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `{arg}`"
            )));
        } else {
            parsed.positional.push(arg);
        }
    }
    Ok(parsed)
}

pub fn parse_amount(label: &str, raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("{label} must be a number, got `{raw}`")))
}
