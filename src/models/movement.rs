//! Movement models
//!
//! `RawMovement` is the loosely-typed record a movement source hands us;
//! `Movement` is the canonical, immutable value the rest of the engine works
//! with. Only the normalizer builds `Movement`s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Kind of financial event on an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Cash or cheque deposit
    Deposit,
    /// Cash withdrawal
    Withdrawal,
    /// Incoming leg of a transfer
    TransferIn,
    /// Outgoing leg of a transfer
    TransferOut,
}

impl MovementKind {
    /// All kinds, in display order
    pub const ALL: [MovementKind; 4] = [
        MovementKind::Deposit,
        MovementKind::Withdrawal,
        MovementKind::TransferIn,
        MovementKind::TransferOut,
    ];

    /// Whether this kind adds money to the account
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Whether this kind is one leg of a transfer
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferIn | Self::TransferOut)
    }

    /// Apply this kind's sign to a magnitude, ignoring any sign it carried
    pub fn signed(&self, amount: Money) -> Money {
        if self.is_inflow() {
            amount.abs()
        } else {
            -amount.abs()
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdrawal => write!(f, "Withdrawal"),
            Self::TransferIn => write!(f, "Transfer In"),
            Self::TransferOut => write!(f, "Transfer Out"),
        }
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").replace(' ', "_").as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            "transfer_in" | "in" => Ok(Self::TransferIn),
            "transfer_out" | "out" => Ok(Self::TransferOut),
            other => {
                let expected: Vec<String> = Self::ALL
                    .iter()
                    .map(|kind| kind.to_string().to_lowercase().replace(' ', "-"))
                    .collect();
                Err(format!(
                    "unknown movement kind '{}' (expected one of: {})",
                    other,
                    expected.join(", ")
                ))
            }
        }
    }
}

/// One financial event on an account, in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    timestamp: DateTime<Utc>,
    kind: MovementKind,
    amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    counterparty: Option<String>,
}

impl Movement {
    /// Build a movement; the amount's sign is forced by `kind` and the
    /// counterparty is kept only for transfers
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        kind: MovementKind,
        amount: Money,
        counterparty: Option<String>,
    ) -> Self {
        let counterparty = counterparty
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && kind.is_transfer());

        Self {
            timestamp,
            kind,
            amount: kind.signed(amount),
            counterparty,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    /// Signed amount: positive for inflows, negative for outflows
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn counterparty(&self) -> Option<&str> {
        self.counterparty.as_deref()
    }
}

/// Raw amount as delivered by a source: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    /// Exact decimal value of the raw amount, sign untouched
    pub fn to_money(&self) -> Option<Money> {
        match self {
            // serde_json prints the shortest representation that round-trips,
            // so 0.1 comes through as "0.1" rather than its binary expansion
            Self::Number(n) => Money::parse(&n.to_string()).ok(),
            Self::Text(s) => Money::parse(s).ok(),
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => Self::Number(n),
            None => Self::Text(value.to_string()),
        }
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A movement record exactly as a movement source supplies it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMovement {
    /// Point in time, possibly with sub-second or timezone noise
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Free-form operation code (e.g. "DEPOSITO", "SAQUE")
    #[serde(default)]
    pub operation_code: String,

    /// Amount as recorded by the source; its sign is not trusted
    #[serde(default)]
    pub amount: Option<RawAmount>,

    /// Other party of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,

    /// Why the source could not decode this record, if it could not
    #[serde(skip)]
    unreadable: Option<String>,
}

impl RawMovement {
    /// Create a raw movement with the common fields
    pub fn new(
        timestamp: impl Into<String>,
        operation_code: impl Into<String>,
        amount: impl Into<RawAmount>,
    ) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            operation_code: operation_code.into(),
            amount: Some(amount.into()),
            counterparty: None,
            unreadable: None,
        }
    }

    /// Placeholder for a record the source found but could not decode
    ///
    /// Keeps the record's position so the normalizer can report it as
    /// malformed instead of the whole fetch failing.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            unreadable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Decoding failure recorded by the source
    pub fn unreadable_reason(&self) -> Option<&str> {
        self.unreadable.as_deref()
    }

    /// Set the counterparty
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sign_follows_kind() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let deposit = Movement::new(ts, MovementKind::Deposit, Money::from_units(-50), None);
        assert_eq!(deposit.amount(), Money::from_units(50));

        let withdrawal = Movement::new(ts, MovementKind::Withdrawal, Money::from_units(50), None);
        assert_eq!(withdrawal.amount(), Money::from_units(-50));

        let out = Movement::new(ts, MovementKind::TransferOut, Money::from_units(20), None);
        assert_eq!(out.amount(), Money::from_units(-20));
    }

    #[test]
    fn test_counterparty_only_for_transfers() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let deposit = Movement::new(
            ts,
            MovementKind::Deposit,
            Money::from_units(1),
            Some("Maria".into()),
        );
        assert_eq!(deposit.counterparty(), None);

        let transfer = Movement::new(
            ts,
            MovementKind::TransferIn,
            Money::from_units(1),
            Some("  Maria  ".into()),
        );
        assert_eq!(transfer.counterparty(), Some("Maria"));

        let blank = Movement::new(
            ts,
            MovementKind::TransferIn,
            Money::from_units(1),
            Some("   ".into()),
        );
        assert_eq!(blank.counterparty(), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("deposit".parse::<MovementKind>(), Ok(MovementKind::Deposit));
        assert_eq!("Transfer-In".parse::<MovementKind>(), Ok(MovementKind::TransferIn));
        assert_eq!("transfer out".parse::<MovementKind>(), Ok(MovementKind::TransferOut));
        assert_eq!(
            "pix".parse::<MovementKind>(),
            Err("unknown movement kind 'pix' (expected one of: deposit, withdrawal, transfer-in, transfer-out)".to_string())
        );
    }

    #[test]
    fn test_raw_movement_deserialize() {
        let json = r#"[
            {"timestamp": "2025-01-01T10:00:00.123", "operationCode": "DEPOSITO", "amount": 500},
            {"timestamp": "2025-01-02T10:00:00", "operationCode": "SAQUE", "amount": "12.30"},
            {"operationCode": "TRANSFERENCIA_ORIGEM", "amount": 0.1, "counterparty": "Joao"}
        ]"#;
        let raws: Vec<RawMovement> = serde_json::from_str(json).unwrap();

        assert_eq!(raws.len(), 3);
        assert_eq!(raws[0].amount.as_ref().unwrap().to_money(), Some(Money::from_units(500)));
        assert_eq!(raws[1].amount.as_ref().unwrap().to_money(), Some(Money::from_cents(1230)));
        assert_eq!(raws[2].timestamp, None);
        assert_eq!(
            raws[2].amount.as_ref().unwrap().to_money(),
            Some(Money::parse("0.1").unwrap())
        );
        assert_eq!(raws[2].counterparty.as_deref(), Some("Joao"));
    }

    #[test]
    fn test_unreadable_placeholder() {
        let raw = RawMovement::unreadable("invalid type: boolean `true`");

        assert_eq!(raw.unreadable_reason(), Some("invalid type: boolean `true`"));
        assert_eq!(raw.timestamp, None);
        assert_eq!(
            RawMovement::new("2025-01-01", "SAQUE", 1_i64).unreadable_reason(),
            None
        );
    }

    #[test]
    fn test_raw_amount_from_nan_is_unparseable() {
        assert_eq!(RawAmount::from(f64::NAN).to_money(), None);
    }
}
