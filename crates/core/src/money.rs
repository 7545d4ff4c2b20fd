//! Monetary amounts in minor units (cents).
//!
//! All amounts are stored as integer cents to avoid floating-point error;
//! conversion to and from decimal dollars happens here and nowhere else.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A monetary amount in minor units.
///
/// Value object: immutable, compared by value. The inner integer is the exact
/// number of cents; display values are `amount / 100`.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor_units(cents: i64) -> Self {
        Self(cents)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Convert decimal dollars to cents, rounding to the nearest cent.
    pub fn from_major_units(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    /// Convert cents to decimal dollars.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}
