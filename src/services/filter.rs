//! Record filter
//!
//! Narrows what a statement shows without touching balances: a filtered day
//! keeps the consolidated balance computed from all of its movements.

use crate::models::{DailyRecord, Movement, MovementKind};

/// Caller-owned narrowing of a statement's daily records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only movements of these kinds
    pub kinds: Option<Vec<MovementKind>>,
    /// Keep only movements whose counterparty contains this text (case-insensitive)
    pub counterparty_contains: Option<String>,
    /// Drop days without movements
    pub hide_empty_days: bool,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by movement kinds
    pub fn kinds(mut self, kinds: Vec<MovementKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    /// Filter by counterparty text
    pub fn counterparty(mut self, text: impl Into<String>) -> Self {
        self.counterparty_contains = Some(text.into());
        self
    }

    /// Hide days without movements
    pub fn hide_empty_days(mut self) -> Self {
        self.hide_empty_days = true;
        self
    }

    /// Whether this filter narrows movements (not just empty days)
    pub fn filters_movements(&self) -> bool {
        self.kinds.is_some() || self.search_term().is_some()
    }

    /// Whether applying this filter changes anything
    pub fn is_identity(&self) -> bool {
        !self.filters_movements() && !self.hide_empty_days
    }

    /// Check if a movement matches this filter
    pub fn matches(&self, movement: &Movement) -> bool {
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&movement.kind()) {
                return false;
            }
        }

        if let Some(term) = self.search_term() {
            let matches_counterparty = movement
                .counterparty()
                .map(|c| c.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !matches_counterparty {
                return false;
            }
        }

        true
    }

    /// Apply the filter to an ordered record sequence
    ///
    /// When movements are filtered, days left with none are dropped too.
    pub fn apply(&self, records: &[DailyRecord]) -> Vec<DailyRecord> {
        if self.is_identity() {
            return records.to_vec();
        }

        records
            .iter()
            .filter_map(|record| {
                let movements: Vec<Movement> = record
                    .movements
                    .iter()
                    .filter(|m| self.matches(m))
                    .cloned()
                    .collect();

                if movements.is_empty() {
                    return None;
                }

                Some(DailyRecord {
                    date: record.date,
                    movements,
                    consolidated_balance: record.consolidated_balance,
                })
            })
            .collect()
    }

    fn search_term(&self) -> Option<String> {
        self.counterparty_contains
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}
