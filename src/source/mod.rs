//! Movement sources
//!
//! A movement source supplies raw movements for an account and date range.
//! The engine depends only on the [`MovementSource`] capability; which
//! implementation is used is decided by the composition root.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSource;
pub use memory::InMemorySource;

use crate::error::StatementResult;
use crate::models::{AccountId, DateRange, RawMovement};

/// Capability to fetch raw movements for one account
///
/// Implementations may return records outside `range`; the grouper drops
/// them. Transport failures are reported as `StatementError::Source` and
/// are passed to the caller unchanged.
pub trait MovementSource: Send + Sync {
    fn fetch_movements(
        &self,
        account: &AccountId,
        range: &DateRange,
    ) -> StatementResult<Vec<RawMovement>>;
}
