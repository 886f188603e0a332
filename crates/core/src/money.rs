//! Money as exact integer cents.
//!
//! The bakery service speaks JSON floats (`2.5`, `3.75`). Converting once at
//! the boundary keeps every sum exact, so `2.50 + 3.75` is always `6.25`.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Largest amount (in cents) that still round-trips through an `f64`.
const MAX_EXACT_CENTS: u64 = 1 << 53;

/// A non-negative price in the smallest currency unit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Convert a decimal amount (as sent by the service) to cents, rounding
    /// to the nearest cent.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::invalid_price(format!("{amount} is not finite")));
        }
        if amount < 0.0 {
            return Err(DomainError::invalid_price(format!("{amount} is negative")));
        }

        let cents = (amount * 100.0).round();
        if cents >= MAX_EXACT_CENTS as f64 {
            return Err(DomainError::invalid_price(format!("{amount} is out of range")));
        }

        Ok(Self {
            cents: cents as u64,
        })
    }

    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}
