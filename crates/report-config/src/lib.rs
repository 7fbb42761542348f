//! report-config
//!
//! Persistent settings for the execution report tools.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_home, ConfigManager, HOME_ENV_VAR};
pub use model::{Config, MAX_AUTOSAVE_DELAY_SECS, MAX_DRAFT_RETENTION_HOURS};
