//! Inclusive calendar-day range

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::{StatementError, StatementResult};

/// An inclusive range of calendar days, `start <= end` guaranteed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, failing with `InvalidRange` when `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> StatementResult<Self> {
        if start > end {
            return Err(StatementError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> StatementResult<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
                StatementError::Validation(format!("Invalid date '{}': {}. Use YYYY-MM-DD", s, e))
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Check whether a date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Zero-based position of `date` within the range, if inside it
    pub fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.start).num_days() as usize)
        } else {
            None
        }
    }

    /// Iterate every day in the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.day_count() as i64).map(move |i| start + Duration::days(i))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
