//! Path management for the statement CLI
//!
//! ## Path Resolution Order
//!
//! 1. `STATEMENT_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/statement-cli` or `~/.config/statement-cli`
//! 3. Windows: `%APPDATA%\statement-cli`

use std::path::PathBuf;

use crate::error::StatementError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "STATEMENT_CLI_DATA_DIR";

/// Manages all paths used by the statement CLI
#[derive(Debug, Clone)]
pub struct StatementPaths {
    base_dir: PathBuf,
}

impl StatementPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, StatementError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), StatementError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StatementError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, StatementError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                StatementError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("statement-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, StatementError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| StatementError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("statement-cli"))
}
