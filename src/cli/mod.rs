//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod statement;

pub use statement::{handle_show_command, OutputFormat, ShowArgs};
