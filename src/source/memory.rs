//! In-memory movement source

use std::collections::HashMap;

use super::MovementSource;
use crate::error::{StatementError, StatementResult};
use crate::models::{AccountId, DateRange, RawMovement};

/// Movement source backed by a map of account → raw movements
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    accounts: HashMap<AccountId, Vec<RawMovement>>,
    failure: Option<String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw movements for an account
    pub fn with_movements(
        mut self,
        account: impl Into<AccountId>,
        movements: Vec<RawMovement>,
    ) -> Self {
        self.accounts
            .entry(account.into())
            .or_default()
            .extend(movements);
        self
    }

    /// Make every fetch fail with a source error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            accounts: HashMap::new(),
            failure: Some(message.into()),
        }
    }
}

impl MovementSource for InMemorySource {
    fn fetch_movements(
        &self,
        account: &AccountId,
        _range: &DateRange,
    ) -> StatementResult<Vec<RawMovement>> {
        if let Some(ref message) = self.failure {
            return Err(StatementError::Source(message.clone()));
        }
        Ok(self.accounts.get(account).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::single_day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn test_fetch_by_account() {
        let source = InMemorySource::new()
            .with_movements("A", vec![RawMovement::new("2025-01-01", "DEPOSITO", 1.0)])
            .with_movements("A", vec![RawMovement::new("2025-01-01", "SAQUE", 1.0)]);

        let found = source
            .fetch_movements(&AccountId::from("A"), &range())
            .unwrap();
        assert_eq!(found.len(), 2);

        let missing = source
            .fetch_movements(&AccountId::from("B"), &range())
            .unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_failing_source() {
        let source = InMemorySource::failing("connection reset");
        let err = source
            .fetch_movements(&AccountId::from("A"), &range())
            .unwrap_err();
        assert_eq!(err, StatementError::Source("connection reset".into()));
    }
}
