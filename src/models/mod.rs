//! Core data models for the statement engine
//!
//! Value objects only: every request owns its own copies and nothing here
//! holds shared mutable state.

pub mod account;
pub mod money;
pub mod movement;
pub mod page;
pub mod range;
pub mod record;

pub use account::AccountId;
pub use money::Money;
pub use movement::{Movement, MovementKind, RawAmount, RawMovement};
pub use page::Page;
pub use range::DateRange;
pub use record::{DailyRecord, DayBucket};
