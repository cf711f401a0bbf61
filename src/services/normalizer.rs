//! Movement normalizer
//!
//! Maps raw source records into canonical [`Movement`]s.
//!
//! Timestamps: everything from the first `.` onward is discarded (sub-second
//! digits and whatever suffix followed them). An explicit offset left in the
//! remainder (`Z` or `±HH:MM`) is honoured; a naive remainder is read as UTC.
//! The same rule applies to every record, whatever path it came through.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

use super::options::UnknownKindPolicy;
use crate::error::{StatementError, StatementResult};
use crate::models::{Money, Movement, MovementKind, RawMovement};

/// Operation-code fragments, most specific first
const KIND_PATTERNS: &[(&str, MovementKind)] = &[
    ("TRANSFERENCIA_ORIGEM", MovementKind::TransferOut),
    ("TRANSFER_OUT", MovementKind::TransferOut),
    ("OUTGOING", MovementKind::TransferOut),
    ("TRANSFERENCIA_DESTINO", MovementKind::TransferIn),
    ("TRANSFER_IN", MovementKind::TransferIn),
    ("INCOMING", MovementKind::TransferIn),
    ("DEPOSITO", MovementKind::Deposit),
    ("DEPOSIT", MovementKind::Deposit),
    ("SAQUE", MovementKind::Withdrawal),
    ("WITHDRAWAL", MovementKind::Withdrawal),
];

/// Largest accepted movement magnitude, in whole currency units
///
/// Anything bigger is rejected as malformed, which keeps every running
/// balance far inside the decimal range.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%:z"];

/// A raw record the normalizer could not accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMovement {
    /// Position of the record in the source's list
    pub index: usize,
    pub error: StatementError,
}

/// Outcome of normalizing a whole batch
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub movements: Vec<Movement>,
    pub skipped: Vec<SkippedMovement>,
}

/// Turns raw movement records into canonical movements
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementNormalizer {
    policy: UnknownKindPolicy,
}

impl MovementNormalizer {
    pub fn new(policy: UnknownKindPolicy) -> Self {
        Self { policy }
    }

    /// Normalize one raw record
    ///
    /// Fails with `MalformedMovement` when the timestamp or amount is missing
    /// or unparseable, and with `UnknownMovementKind` when the operation code
    /// matches nothing (unless the compatibility policy is enabled).
    pub fn normalize(&self, raw: &RawMovement) -> StatementResult<Movement> {
        if let Some(reason) = raw.unreadable_reason() {
            return Err(StatementError::malformed(format!("unreadable record: {}", reason)));
        }

        let timestamp_text = raw
            .timestamp
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StatementError::malformed("missing timestamp"))?;

        let timestamp = parse_timestamp(timestamp_text).ok_or_else(|| {
            StatementError::malformed(format!("unparseable timestamp '{}'", timestamp_text))
        })?;

        let amount = match &raw.amount {
            None => return Err(StatementError::malformed("missing amount")),
            Some(value) => value.to_money().ok_or_else(|| {
                StatementError::malformed(format!("unparseable amount {:?}", value))
            })?,
        };
        if amount.abs() > Money::from_units(MAX_AMOUNT_UNITS) {
            return Err(StatementError::malformed(format!(
                "amount {} exceeds the accepted magnitude",
                amount.as_decimal()
            )));
        }

        let kind = match infer_kind(&raw.operation_code) {
            Some(kind) => kind,
            None => self.fallback_kind(&raw.operation_code, amount)?,
        };

        Ok(Movement::new(
            timestamp,
            kind,
            amount,
            raw.counterparty.clone(),
        ))
    }

    /// Normalize a batch, skipping and recording every record that fails
    pub fn normalize_all<I>(&self, raws: I) -> NormalizedBatch
    where
        I: IntoIterator<Item = RawMovement>,
    {
        let mut batch = NormalizedBatch::default();

        for (index, raw) in raws.into_iter().enumerate() {
            match self.normalize(&raw) {
                Ok(movement) => batch.movements.push(movement),
                Err(error) => {
                    warn!(index, %error, "skipping movement");
                    batch.skipped.push(SkippedMovement { index, error });
                }
            }
        }

        debug!(
            accepted = batch.movements.len(),
            skipped = batch.skipped.len(),
            "normalized movements"
        );
        batch
    }

    fn fallback_kind(&self, code: &str, amount: Money) -> StatementResult<MovementKind> {
        match self.policy {
            UnknownKindPolicy::Reject => Err(StatementError::unknown_kind(code)),
            UnknownKindPolicy::TreatAsTransfer => {
                let kind = if amount.is_negative() {
                    MovementKind::TransferOut
                } else {
                    MovementKind::TransferIn
                };
                warn!(code, %kind, "unknown operation code treated as transfer");
                Ok(kind)
            }
        }
    }
}

/// Classify an operation code by case-insensitive substring match
pub fn infer_kind(code: &str) -> Option<MovementKind> {
    let upper = code.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    KIND_PATTERNS
        .iter()
        .find(|(pattern, _)| upper.contains(pattern))
        .map(|(_, kind)| *kind)
}

/// Parse a source timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.split('.').next().unwrap_or_default().trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_text = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .unwrap_or(text);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(naive_text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawAmount;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_deposit_with_negative_raw_amount_is_positive() {
        let raw = RawMovement::new("2025-01-10T09:00:00", "DEPOSITO", -250.0);
        let movement = MovementNormalizer::default().normalize(&raw).unwrap();

        assert_eq!(movement.kind(), MovementKind::Deposit);
        assert_eq!(movement.amount(), Money::from_units(250));
    }

    #[test]
    fn test_withdrawal_with_positive_raw_amount_is_negative() {
        let raw = RawMovement::new("2025-01-10T09:00:00", "saque", 80.5);
        let movement = MovementNormalizer::default().normalize(&raw).unwrap();

        assert_eq!(movement.kind(), MovementKind::Withdrawal);
        assert_eq!(movement.amount(), Money::from_cents(-8050));
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind("DEPOSITO"), Some(MovementKind::Deposit));
        assert_eq!(infer_kind("deposito_caixa"), Some(MovementKind::Deposit));
        assert_eq!(infer_kind("Saque"), Some(MovementKind::Withdrawal));
        assert_eq!(
            infer_kind("TRANSFERENCIA_ORIGEM"),
            Some(MovementKind::TransferOut)
        );
        assert_eq!(
            infer_kind("transferencia_destino"),
            Some(MovementKind::TransferIn)
        );
        assert_eq!(infer_kind("outgoing"), Some(MovementKind::TransferOut));
        assert_eq!(infer_kind("INCOMING_WIRE"), Some(MovementKind::TransferIn));
        assert_eq!(infer_kind("TRANSFERENCIA"), None);
        assert_eq!(infer_kind("PIX"), None);
        assert_eq!(infer_kind("   "), None);
    }

    #[test]
    fn test_unknown_kind_rejected_by_default() {
        let raw = RawMovement::new("2025-01-10T09:00:00", "PIX", 10.0);
        let err = MovementNormalizer::default().normalize(&raw).unwrap_err();

        assert_eq!(err, StatementError::unknown_kind("PIX"));
    }

    #[test]
    fn test_unknown_kind_compatibility_flag() {
        let normalizer = MovementNormalizer::new(UnknownKindPolicy::TreatAsTransfer);

        let incoming = RawMovement::new("2025-01-10T09:00:00", "PIX", 10.0);
        let movement = normalizer.normalize(&incoming).unwrap();
        assert_eq!(movement.kind(), MovementKind::TransferIn);
        assert_eq!(movement.amount(), Money::from_units(10));

        let outgoing = RawMovement::new("2025-01-10T09:00:00", "PIX", -10.0);
        let movement = normalizer.normalize(&outgoing).unwrap();
        assert_eq!(movement.kind(), MovementKind::TransferOut);
        assert_eq!(movement.amount(), Money::from_units(-10));
    }

    #[test]
    fn test_timestamp_fraction_is_stripped_and_read_as_utc() {
        assert_eq!(
            parse_timestamp("2025-01-10T23:30:00.123456"),
            Some(utc(2025, 1, 10, 23, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2025-01-10T23:30:00.5Z"),
            Some(utc(2025, 1, 10, 23, 30, 0))
        );
        // the offset after the fraction goes with it
        assert_eq!(
            parse_timestamp("2025-01-10T23:30:00.000-03:00"),
            Some(utc(2025, 1, 10, 23, 30, 0))
        );
    }

    #[test]
    fn test_timestamp_with_explicit_offset() {
        assert_eq!(
            parse_timestamp("2025-01-10T23:30:00-03:00"),
            Some(utc(2025, 1, 11, 2, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2025-01-10T23:30:00Z"),
            Some(utc(2025, 1, 10, 23, 30, 0))
        );
    }

    #[test]
    fn test_timestamp_shapes() {
        assert_eq!(
            parse_timestamp("2025-01-10 08:15:00"),
            Some(utc(2025, 1, 10, 8, 15, 0))
        );
        assert_eq!(
            parse_timestamp("2025-01-10T08:15"),
            Some(utc(2025, 1, 10, 8, 15, 0))
        );
        assert_eq!(parse_timestamp("2025-01-10"), Some(utc(2025, 1, 10, 0, 0, 0)));
        assert_eq!(parse_timestamp("10/01/2025"), None);
        assert_eq!(parse_timestamp(".123"), None);
    }

    #[test]
    fn test_malformed_records() {
        let normalizer = MovementNormalizer::default();

        let mut no_timestamp = RawMovement::new("", "DEPOSITO", 1.0);
        no_timestamp.timestamp = None;
        assert!(matches!(
            normalizer.normalize(&no_timestamp),
            Err(StatementError::MalformedMovement { .. })
        ));

        let bad_timestamp = RawMovement::new("yesterday", "DEPOSITO", 1.0);
        assert!(matches!(
            normalizer.normalize(&bad_timestamp),
            Err(StatementError::MalformedMovement { .. })
        ));

        let mut no_amount = RawMovement::new("2025-01-10", "DEPOSITO", 1.0);
        no_amount.amount = None;
        assert!(matches!(
            normalizer.normalize(&no_amount),
            Err(StatementError::MalformedMovement { .. })
        ));

        let bad_amount = RawMovement::new("2025-01-10", "DEPOSITO", RawAmount::from("abc"));
        assert!(matches!(
            normalizer.normalize(&bad_amount),
            Err(StatementError::MalformedMovement { .. })
        ));
    }

    #[test]
    fn test_amount_above_ceiling_is_malformed() {
        let normalizer = MovementNormalizer::default();

        let huge = RawMovement::new(
            "2025-01-10T10:00:00",
            "DEPOSITO",
            RawAmount::from("50000000000000000000000000000"),
        );
        assert!(matches!(
            normalizer.normalize(&huge),
            Err(StatementError::MalformedMovement { .. })
        ));

        let negative_huge = RawMovement::new("2025-01-10T10:00:00", "SAQUE", -1e16);
        assert!(matches!(
            normalizer.normalize(&negative_huge),
            Err(StatementError::MalformedMovement { .. })
        ));

        let at_ceiling = RawMovement::new("2025-01-10T10:00:00", "DEPOSITO", MAX_AMOUNT_UNITS);
        assert_eq!(
            normalizer.normalize(&at_ceiling).unwrap().amount(),
            Money::from_units(MAX_AMOUNT_UNITS)
        );
    }

    #[test]
    fn test_unreadable_record_is_malformed() {
        let raw = RawMovement::unreadable("invalid type: null, expected a string");
        let err = MovementNormalizer::default().normalize(&raw).unwrap_err();

        assert_eq!(
            err,
            StatementError::malformed("unreadable record: invalid type: null, expected a string")
        );
    }

    #[test]
    fn test_normalize_all_skips_and_records() {
        let raws = vec![
            RawMovement::new("2025-01-10T10:00:00", "DEPOSITO", 100.0),
            RawMovement::new("garbage", "DEPOSITO", 100.0),
            RawMovement::new("2025-01-10T11:00:00", "BOLETO", 100.0),
            RawMovement::new("2025-01-10T12:00:00", "SAQUE", 30.0),
        ];

        let batch = MovementNormalizer::default().normalize_all(raws);

        assert_eq!(batch.movements.len(), 2);
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(batch.skipped[0].index, 1);
        assert!(matches!(
            batch.skipped[0].error,
            StatementError::MalformedMovement { .. }
        ));
        assert_eq!(batch.skipped[1].index, 2);
        assert_eq!(batch.skipped[1].error, StatementError::unknown_kind("BOLETO"));
    }

    #[test]
    fn test_transfer_keeps_counterparty() {
        let raw = RawMovement::new("2025-01-10T10:00:00", "TRANSFERENCIA_ORIGEM", 40.0)
            .with_counterparty("Ana Souza");
        let movement = MovementNormalizer::default().normalize(&raw).unwrap();

        assert_eq!(movement.kind(), MovementKind::TransferOut);
        assert_eq!(movement.amount(), Money::from_units(-40));
        assert_eq!(movement.counterparty(), Some("Ana Souza"));
    }
}
