//! Reports module for the statement CLI
//!
//! Terminal, CSV and JSON presentations of a computed statement.

pub mod statement;

pub use statement::{ReportStyle, StatementReport};
