//! Statement - account statement aggregation engine
//!
//! Turns an unordered list of account movements (deposits, withdrawals,
//! transfers) for a date range into an ordered sequence of per-day records,
//! each carrying the day's movements and a running consolidated balance,
//! ready for paginated display.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Value objects (movements, daily records, pages, money)
//! - `services`: The pipeline (normalizer, grouper, accumulator, paginator)
//! - `source`: Movement sources (in-memory, JSON file)
//! - `reports`: Terminal, CSV and JSON output
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use statement::models::{DateRange, Money, RawMovement};
//! use statement::services::{EngineOptions, StatementRequest, StatementService};
//! use statement::source::InMemorySource;
//!
//! let source = InMemorySource::new().with_movements(
//!     "001",
//!     vec![RawMovement::new("2025-01-01T10:00:00", "DEPOSITO", 500.0)],
//! );
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
//! )?;
//! let statement = StatementService::new(&source, EngineOptions::default())
//!     .build(StatementRequest::new("001", range, Money::from_units(1000), 7))?;
//!
//! assert_eq!(statement.records.len(), 3);
//! assert_eq!(statement.closing_balance, Money::from_units(1500));
//! # Ok::<(), statement::StatementError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod source;

pub use error::{StatementError, StatementResult};
