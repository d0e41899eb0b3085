//! billdesk-config
//!
//! Persistent application settings.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_base_dir, ConfigManager, BASE_DIR_ENV};
pub use model::{Config, StorageBackend, CONFIG_KEYS};
