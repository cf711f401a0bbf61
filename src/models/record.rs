//! Per-day statement records

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::movement::Movement;

/// Movements assigned to one calendar day, before balances are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Calendar day in the reporting timezone
    pub date: NaiveDate,
    /// Movements of the day, timestamp ascending
    pub movements: Vec<Movement>,
}

impl DayBucket {
    /// Create an empty bucket for a day
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            movements: Vec::new(),
        }
    }
}

/// One calendar day of a statement with its end-of-day balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Calendar day (no time component)
    pub date: NaiveDate,
    /// Movements of the day, timestamp ascending; may be empty
    pub movements: Vec<Movement>,
    /// Balance at the end of the day
    pub consolidated_balance: Money,
}

impl DailyRecord {
    /// Sum of the day's signed amounts
    pub fn net_change(&self) -> Money {
        self.movements.iter().map(Movement::amount).sum()
    }

    /// Sum of the day's positive amounts
    pub fn inflows(&self) -> Money {
        self.movements
            .iter()
            .map(Movement::amount)
            .filter(Money::is_positive)
            .sum()
    }

    /// Sum of the day's negative amounts (a non-positive value)
    pub fn outflows(&self) -> Money {
        self.movements
            .iter()
            .map(Movement::amount)
            .filter(Money::is_negative)
            .sum()
    }

    /// Check if the day had no movements
    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }
}
