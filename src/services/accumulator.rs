//! Balance accumulator
//!
//! Walks day buckets in order, carrying the running balance forward. The
//! opening balance always comes from the caller.

use crate::error::{StatementError, StatementResult};
use crate::models::{DailyRecord, DayBucket, Money};

/// Turn ordered day buckets into daily records with consolidated balances
///
/// `consolidated_balance[i] = consolidated_balance[i - 1] + net(bucket[i])`,
/// starting from `opening_balance`. Sums are exact; a balance that leaves the
/// decimal range fails with `BalanceOverflow` naming the day.
pub fn accumulate<I>(buckets: I, opening_balance: Money) -> StatementResult<Vec<DailyRecord>>
where
    I: IntoIterator<Item = DayBucket>,
{
    let mut running = opening_balance;

    buckets
        .into_iter()
        .map(|bucket| -> StatementResult<DailyRecord> {
            running = bucket
                .movements
                .iter()
                .try_fold(running, |balance, movement| {
                    balance.checked_add(movement.amount())
                })
                .ok_or(StatementError::BalanceOverflow { date: bucket.date })?;

            Ok(DailyRecord {
                date: bucket.date,
                movements: bucket.movements,
                consolidated_balance: running,
            })
        })
        .collect()
}
