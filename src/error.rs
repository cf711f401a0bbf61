//! Custom error types for the statement engine
//!
//! Every failure the engine can report is a variant of [`StatementError`].
//! Per-record failures (malformed or unrecognized movements) are recoverable:
//! the statement service skips the record and keeps aggregating.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for statement operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// A raw movement lacks a parseable timestamp or amount
    #[error("Malformed movement: {reason}")]
    MalformedMovement { reason: String },

    /// A raw movement carries an operation code we cannot classify
    #[error("Unknown movement kind: '{code}'")]
    UnknownMovementKind { code: String },

    /// The requested date range starts after it ends
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Page size must be strictly positive
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(i64),

    /// A running balance left the representable decimal range
    #[error("Balance overflow on {date}")]
    BalanceOverflow { date: NaiveDate },

    /// The movement source failed; surfaced unchanged
    #[error("Movement source error: {0}")]
    Source(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for caller-supplied input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl StatementError {
    /// Create a malformed-movement error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMovement {
            reason: reason.into(),
        }
    }

    /// Create an unknown-kind error for an operation code
    pub fn unknown_kind(code: impl Into<String>) -> Self {
        Self::UnknownMovementKind { code: code.into() }
    }

    /// Whether this error concerns a single movement record, so the
    /// aggregation can skip the record and continue
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MalformedMovement { .. } | Self::UnknownMovementKind { .. }
        )
    }

    /// Check if this error came from the movement source
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

impl From<std::io::Error> for StatementError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StatementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for StatementError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for statement operations
pub type StatementResult<T> = Result<T, StatementError>;
