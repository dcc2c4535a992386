//! Monetary amounts.

use core::fmt;
use core::ops::{Add, Mul, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of decimal places every amount is stored with.
pub const MONEY_SCALE: u32 = 2;

/// Non-negative amount, always held at two decimal places.
///
/// Construction rounds midpoints to even (`25.125 -> 25.12`, `25.999 -> 26.00`).
/// Arithmetic never mutates; it builds a new value and re-applies the same
/// rounding and sign checks, so `-` and `*` are fallible.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation("Amount cannot be negative"));
        }

        let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(MONEY_SCALE);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Ok(Self(rounded))
    }

    pub fn zero() -> Self {
        Self(Decimal::new(0, MONEY_SCALE))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

fn overflow() -> DomainError {
    DomainError::validation("Amount is out of range")
}

impl Add for Money {
    type Output = DomainResult<Money>;

    fn add(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_add(rhs.0).ok_or_else(overflow).and_then(Money::new)
    }
}

impl Sub for Money {
    type Output = DomainResult<Money>;

    fn sub(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_sub(rhs.0).ok_or_else(overflow).and_then(Money::new)
    }
}

impl Mul<Decimal> for Money {
    type Output = DomainResult<Money>;

    fn mul(self, rhs: Decimal) -> DomainResult<Money> {
        self.0.checked_mul(rhs).ok_or_else(overflow).and_then(Money::new)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::new(amount).map_err(serde::de::Error::custom)
    }
}
