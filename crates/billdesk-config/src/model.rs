use serde::{de::Deserializer, Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::ConfigError;

/// Stores application settings shared by the shell and the billing desk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_tax_rate: f64,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub strict_dates: bool,
    #[serde(default = "Config::default_bill_number_attempts")]
    pub bill_number_attempts: u32,
    #[serde(default = "Config::default_seed_inventory")]
    pub seed_inventory: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding `bills.json` and `inventory.json`. Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Workbook file for the sheet backend. No default: the sheet backend
    /// reports itself unconfigured until this is set.
    pub workbook_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for product images. Defaults to `<base>/images`.
    pub image_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_tax_rate: 0.0,
            storage: StorageBackend::default(),
            strict_dates: false,
            bill_number_attempts: Self::default_bill_number_attempts(),
            seed_inventory: Self::default_seed_inventory(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            workbook_path: None,
            image_dir: None,
        }
    }
}

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "currency_symbol",
    "default_tax_rate",
    "storage",
    "strict_dates",
    "bill_number_attempts",
    "seed_inventory",
    "ui_color_enabled",
    "data_dir",
    "workbook_path",
    "image_dir",
];

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_bill_number_attempts() -> u32 {
        3
    }

    pub fn default_seed_inventory() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| base.join("data"))
    }

    pub fn resolve_image_dir(&self, base: &Path) -> PathBuf {
        self.image_dir.clone().unwrap_or_else(|| base.join("images"))
    }

    /// Updates a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "default_tax_rate" => {
                let rate = parse_number(key, value)?;
                if rate < 0.0 {
                    return Err(invalid(key, "must not be negative"));
                }
                self.default_tax_rate = rate;
            }
            "storage" => {
                self.storage = StorageBackend::parse(value)
                    .ok_or_else(|| invalid(key, "expected `json` or `sheet`"))?;
            }
            "strict_dates" => self.strict_dates = parse_bool(key, value)?,
            "bill_number_attempts" => {
                let attempts: u32 = value
                    .parse()
                    .map_err(|_| invalid(key, "expected a whole number"))?;
                self.bill_number_attempts = attempts.max(1);
            }
            "seed_inventory" => self.seed_inventory = parse_bool(key, value)?,
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "data_dir" => self.data_dir = optional_path(value),
            "workbook_path" => self.workbook_path = optional_path(value),
            "image_dir" => self.image_dir = optional_path(value),
            other => {
                return Err(invalid(
                    other,
                    &format!("unknown key (known: {})", CONFIG_KEYS.join(", ")),
                ))
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| invalid(key, "expected a number"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "expected true or false")),
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Selects which persistence backend the desk uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Sheet,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Some(StorageBackend::Json),
            "sheet" | "sheets" | "spreadsheet" => Some(StorageBackend::Sheet),
            _ => None,
        }
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Json
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StorageBackend::Json => "json",
            StorageBackend::Sheet => "sheet",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for StorageBackend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .and_then(StorageBackend::parse)
            .unwrap_or_default())
    }
}
