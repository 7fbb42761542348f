use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Longest autosave delay accepted from a config file.
pub const MAX_AUTOSAVE_DELAY_SECS: u64 = 24 * 60 * 60;
/// Longest draft retention accepted from a config file.
pub const MAX_DRAFT_RETENTION_HOURS: u64 = 365 * 24;

/// User-configurable settings for editing sessions and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_autosave_delay_secs")]
    pub autosave_delay_secs: u64,
    #[serde(default = "Config::default_draft_retention_hours")]
    pub draft_retention_hours: u64,
    #[serde(default = "Config::default_fiscal_year_value")]
    pub default_fiscal_year: String,
    #[serde(default)]
    pub hospital_mode: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Overrides the `RUST_LOG`-style filter used when tracing starts.
    pub log_filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding draft files. Defaults to `<home>/drafts`.
    pub drafts_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory receiving saved reports. Defaults to `<home>/reports`.
    pub reports_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autosave_delay_secs: Self::default_autosave_delay_secs(),
            draft_retention_hours: Self::default_draft_retention_hours(),
            default_fiscal_year: Self::default_fiscal_year_value(),
            hospital_mode: false,
            ui_color_enabled: Self::default_ui_color_enabled(),
            log_filter: None,
            district: None,
            project: None,
            program: None,
            drafts_root: None,
            reports_root: None,
        }
    }
}

impl Config {
    pub fn default_autosave_delay_secs() -> u64 {
        30
    }

    pub fn default_draft_retention_hours() -> u64 {
        24
    }

    pub fn default_fiscal_year_value() -> String {
        "2023".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::seconds(saturating_i64(self.autosave_delay_secs).min(i64::MAX / 1_000_000))
    }

    pub fn draft_retention(&self) -> Duration {
        Duration::hours(saturating_i64(self.draft_retention_hours).min(i64::MAX / 3_600_000))
    }

    pub fn resolve_drafts_root(&self, home: &Path) -> PathBuf {
        self.drafts_root
            .clone()
            .unwrap_or_else(|| home.join("drafts"))
    }

    pub fn resolve_reports_root(&self, home: &Path) -> PathBuf {
        self.reports_root
            .clone()
            .unwrap_or_else(|| home.join("reports"))
    }

    /// Rejects settings an editing session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autosave_delay_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "autosave_delay_secs",
                reason: "must be at least one second".into(),
            });
        }
        if self.autosave_delay_secs > MAX_AUTOSAVE_DELAY_SECS {
            return Err(ConfigError::Invalid {
                field: "autosave_delay_secs",
                reason: format!("must be at most {MAX_AUTOSAVE_DELAY_SECS} seconds"),
            });
        }
        if self.draft_retention_hours == 0 {
            return Err(ConfigError::Invalid {
                field: "draft_retention_hours",
                reason: "must be at least one hour".into(),
            });
        }
        if self.draft_retention_hours > MAX_DRAFT_RETENTION_HOURS {
            return Err(ConfigError::Invalid {
                field: "draft_retention_hours",
                reason: format!("must be at most {MAX_DRAFT_RETENTION_HOURS} hours"),
            });
        }
        if self.default_fiscal_year.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "default_fiscal_year",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
