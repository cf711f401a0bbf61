//! Engine options shared by the pipeline stages

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// What the normalizer does with an operation code it cannot classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// Fail the record with `UnknownMovementKind`
    #[default]
    Reject,
    /// Legacy compatibility: treat the record as a transfer whose direction
    /// follows the raw amount's sign
    TreatAsTransfer,
}

/// Options for one engine invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Offset used to decide which calendar day a movement belongs to
    pub reporting_offset: FixedOffset,
    pub unknown_kind_policy: UnknownKindPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            reporting_offset: utc(),
            unknown_kind_policy: UnknownKindPolicy::Reject,
        }
    }
}

impl EngineOptions {
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.reporting_offset = offset;
        self
    }

    pub fn with_unknown_kind_policy(mut self, policy: UnknownKindPolicy) -> Self {
        self.unknown_kind_policy = policy;
        self
    }
}

/// The UTC offset
pub fn utc() -> FixedOffset {
    Utc.fix()
}
