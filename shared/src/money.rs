//! Fixed-point money
//!
//! Amounts are stored as integer cents so that bill totals stay exact under
//! repeated addition. Conversion from the floating point values found in
//! snapshots and form input goes through `rust_decimal` and rounds half away
//! from zero to the cent.

use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of decimal places carried by [`Money`]
pub const DECIMAL_PLACES: u32 = 2;

/// Monetary amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::from_units(35)` is `35.00`
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Convert a floating point amount, rounding to the cent
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::from_decimal(Decimal::from_f64(value)?)
    }

    /// Convert a decimal amount, rounding to the cent
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let rounded =
            value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Self)
    }

    #[inline]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
    }

    pub fn to_f64(self) -> f64 {
        self.to_decimal().to_f64().unwrap_or_default()
    }

    /// Line amount for `quantity` units at this price
    #[inline]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid money amount: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_rounds_to_cent() {
        assert_eq!(Money::from_f64(12.50), Some(Money::from_cents(1250)));
        assert_eq!(Money::from_f64(0.01), Some(Money::from_cents(1)));
        assert_eq!(Money::from_f64(0.005), Some(Money::from_cents(1)));
        assert_eq!(Money::from_f64(35.0), Some(Money::from_units(35)));
        assert_eq!(Money::from_f64(f64::NAN), None);
        assert_eq!(Money::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_accumulation_is_exact() {
        // 0.1 + 0.2 drifts in f64, not in cents
        let sum = Money::from_f64(0.1).unwrap() + Money::from_f64(0.2).unwrap();
        assert_eq!(sum, Money::from_f64(0.3).unwrap());

        let total: Money = (0..1000).map(|_| Money::from_f64(0.01).unwrap()).sum();
        assert_eq!(total, Money::from_units(10));
    }

    #[test]
    fn test_times() {
        assert_eq!(Money::from_units(35).times(2), Money::from_units(70));
        assert_eq!(Money::from_cents(1099).times(3), Money::from_cents(3297));
        assert_eq!(Money::from_cents(i64::MAX).times(2), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(125).to_string(), "125.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_serde_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");
        let m: Money = serde_json::from_str("35").unwrap();
        assert_eq!(m, Money::from_units(35));
        let m: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(m.cents(), 1999);
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }
}
