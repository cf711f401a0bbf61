//! Configuration module for the statement CLI
//!
//! - Path resolution for the settings file
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::StatementPaths;
pub use settings::Settings;
