//! Service layer for the statement engine
//!
//! Each pipeline stage lives in its own module; `statement` wires them
//! together for one request.

pub mod accumulator;
pub mod filter;
pub mod grouper;
pub mod normalizer;
pub mod options;
pub mod paginator;
pub mod statement;

pub use accumulator::accumulate;
pub use filter::RecordFilter;
pub use grouper::DailyGrouper;
pub use normalizer::{MovementNormalizer, NormalizedBatch, SkippedMovement};
pub use options::{EngineOptions, UnknownKindPolicy};
pub use paginator::paginate;
pub use statement::{Statement, StatementRequest, StatementService};
