//! Money value object.
//!
//! A decimal currency amount. Currency itself is a presentation concern and is
//! not tracked here.

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Decimal money amount.
///
/// Negative amounts are representable; rejecting them is left to whoever
/// enforces the business rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Amount multiplied by a unit count, saturating at the `Decimal` bounds.
    pub fn times(self, units: i32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(units)))
    }

    /// Amount multiplied by a unit count, or `None` if it would overflow.
    pub fn checked_times(self, units: i32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(units)).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at the `Decimal` bounds.
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
