//! Daily grouper
//!
//! Partitions movements into one bucket per calendar day of the requested
//! range. Days are decided in the reporting timezone; movements falling
//! outside the range belong to another report and are dropped.

use chrono::{FixedOffset, NaiveDate};
use tracing::debug;

use super::options::utc;
use crate::error::StatementResult;
use crate::models::{DateRange, DayBucket, Movement};

/// Assigns movements to calendar-day buckets
#[derive(Debug, Clone, Copy)]
pub struct DailyGrouper {
    offset: FixedOffset,
}

impl Default for DailyGrouper {
    fn default() -> Self {
        Self::new(utc())
    }
}

impl DailyGrouper {
    /// Create a grouper that buckets by the given reporting offset
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar day of a movement in the reporting timezone
    pub fn day_of(&self, movement: &Movement) -> NaiveDate {
        movement.timestamp().with_timezone(&self.offset).date_naive()
    }

    /// Group movements into buckets for `[range_start, range_end]`
    ///
    /// Fails with `InvalidRange` when `range_start > range_end`.
    pub fn group<I>(
        &self,
        movements: I,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> StatementResult<Vec<DayBucket>>
    where
        I: IntoIterator<Item = Movement>,
    {
        let range = DateRange::new(range_start, range_end)?;
        Ok(self.group_range(movements, &range))
    }

    /// Group movements into one bucket per day of an already validated range
    ///
    /// Single pass over the movements; memory is one bucket per day.
    pub fn group_range<I>(&self, movements: I, range: &DateRange) -> Vec<DayBucket>
    where
        I: IntoIterator<Item = Movement>,
    {
        let mut buckets: Vec<DayBucket> = range.days().map(DayBucket::empty).collect();
        let mut dropped = 0usize;

        for movement in movements {
            match range.offset_of(self.day_of(&movement)) {
                Some(index) => buckets[index].movements.push(movement),
                None => dropped += 1,
            }
        }

        // stable: equal timestamps keep input order
        for bucket in &mut buckets {
            bucket.movements.sort_by_key(Movement::timestamp);
        }

        debug!(days = buckets.len(), dropped, "grouped movements by day");
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatementError;
    use crate::models::{Money, MovementKind};
    use chrono::{DateTime, TimeZone, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, h, m, 0).unwrap()
    }

    fn deposit(ts: DateTime<Utc>, units: i64) -> Movement {
        Movement::new(ts, MovementKind::Deposit, Money::from_units(units), None)
    }

    #[test]
    fn test_one_bucket_per_day_including_empty_days() {
        let movements = vec![deposit(at(1, 10, 0), 1), deposit(at(3, 10, 0), 2)];
        let buckets = DailyGrouper::default()
            .group(movements, date(1), date(4))
            .unwrap();

        let dates: Vec<_> = buckets.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3), date(4)]);
        assert_eq!(buckets[0].movements.len(), 1);
        assert!(buckets[1].movements.is_empty());
        assert_eq!(buckets[2].movements.len(), 1);
        assert!(buckets[3].movements.is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let buckets = DailyGrouper::default()
            .group(Vec::new(), date(5), date(5))
            .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, date(5));
    }

    #[test]
    fn test_invalid_range() {
        let err = DailyGrouper::default()
            .group(Vec::new(), date(5), date(4))
            .unwrap_err();
        assert!(matches!(err, StatementError::InvalidRange { .. }));
    }

    #[test]
    fn test_out_of_range_movements_dropped() {
        let movements = vec![
            deposit(at(1, 23, 59), 1),
            deposit(at(2, 0, 0), 2),
            deposit(at(3, 23, 59), 3),
            deposit(at(4, 0, 0), 4),
        ];
        let buckets = DailyGrouper::default()
            .group(movements, date(2), date(3))
            .unwrap();

        let total: Money = buckets
            .iter()
            .flat_map(|b| b.movements.iter().map(Movement::amount))
            .sum();
        assert_eq!(total, Money::from_units(5));
    }

    #[test]
    fn test_sorted_by_timestamp_and_stable_on_ties() {
        let movements = vec![
            deposit(at(1, 15, 0), 1),
            deposit(at(1, 9, 0), 2),
            deposit(at(1, 15, 0), 3),
            deposit(at(1, 9, 0), 4),
        ];
        let buckets = DailyGrouper::default()
            .group(movements, date(1), date(1))
            .unwrap();

        let amounts: Vec<_> = buckets[0].movements.iter().map(|m| m.amount()).collect();
        assert_eq!(
            amounts,
            vec![
                Money::from_units(2),
                Money::from_units(4),
                Money::from_units(1),
                Money::from_units(3),
            ]
        );
    }

    #[test]
    fn test_utc_bucketing_at_midnight_boundary() {
        // 01:30 UTC on the 2nd
        let movements = vec![deposit(at(2, 1, 30), 10)];
        let buckets = DailyGrouper::default()
            .group(movements, date(1), date(2))
            .unwrap();

        assert!(buckets[0].movements.is_empty());
        assert_eq!(buckets[1].movements.len(), 1);
    }

    #[test]
    fn test_local_offset_bucketing_at_midnight_boundary() {
        // 01:30 UTC on the 2nd is 22:30 on the 1st at UTC-3
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let movements = vec![deposit(at(2, 1, 30), 10)];
        let buckets = DailyGrouper::new(offset)
            .group(movements, date(1), date(2))
            .unwrap();

        assert_eq!(buckets[0].movements.len(), 1);
        assert!(buckets[1].movements.is_empty());
    }

    #[test]
    fn test_east_offset_moves_late_movement_forward() {
        // 22:00 UTC on the 1st is 01:00 on the 2nd at UTC+3
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let movements = vec![deposit(at(1, 22, 0), 10)];
        let buckets = DailyGrouper::new(offset)
            .group(movements, date(1), date(2))
            .unwrap();

        assert!(buckets[0].movements.is_empty());
        assert_eq!(buckets[1].movements.len(), 1);
    }
}
