//! Money type for representing currency amounts
//!
//! Wraps an exact decimal so sums over long ranges never drift. Arithmetic
//! keeps full precision; rounding to cents happens only when an amount is
//! formatted for display or export.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;

/// Represents a monetary amount as an exact decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use statement::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money amount from whole units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the exact underlying decimal
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add two amounts, returning `None` if the result leaves the decimal range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Round to cents (half away from zero) for presentation
    pub fn rounded(&self) -> Decimal {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        cents
    }

    /// Parse a money amount from a string
    ///
    /// Accepts plain decimals ("10.50", "-3", "+7.125") and scientific
    /// notation ("1e3"). No precision is discarded.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        let unsigned = s.strip_prefix('+').unwrap_or(s);

        Decimal::from_str(unsigned)
            .or_else(|_| Decimal::from_scientific(unsigned))
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))
    }

    /// Format with a currency symbol, rounded to cents
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
