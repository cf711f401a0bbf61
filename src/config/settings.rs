//! User settings for the statement CLI
//!
//! Manages the reporting timezone, the unknown-operation compatibility flag,
//! and display preferences.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::paths::StatementPaths;
use crate::error::StatementError;
use crate::services::{EngineOptions, UnknownKindPolicy};

/// Largest accepted reporting offset, in minutes (±23:59)
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// User settings for the statement CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Reporting timezone as minutes east of UTC (0 = UTC, -180 = UTC-3)
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// How unrecognized operation codes are handled
    #[serde(default)]
    pub unknown_kind_policy: UnknownKindPolicy,

    /// Days shown per statement page
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    7
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            utc_offset_minutes: 0,
            unknown_kind_policy: UnknownKindPolicy::default(),
            default_page_size: default_page_size(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Reporting timezone as a fixed offset
    pub fn reporting_offset(&self) -> Result<FixedOffset, StatementError> {
        offset_from_minutes(self.utc_offset_minutes)
    }

    /// Engine options derived from these settings
    pub fn engine_options(&self) -> Result<EngineOptions, StatementError> {
        Ok(EngineOptions::default()
            .with_offset(self.reporting_offset()?)
            .with_unknown_kind_policy(self.unknown_kind_policy))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &StatementPaths) -> Result<Self, StatementError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                StatementError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                StatementError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller asks
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &StatementPaths) -> Result<(), StatementError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            StatementError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            StatementError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

/// Convert minutes east of UTC into a fixed offset
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, StatementError> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(StatementError::Config(format!(
            "UTC offset of {} minutes is out of range (±{})",
            minutes, MAX_OFFSET_MINUTES
        )));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
        StatementError::Config(format!("UTC offset of {} minutes is invalid", minutes))
    })
}
