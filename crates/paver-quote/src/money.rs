//! Money type for quote pricing.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues in monetary totals. Quotes are single-currency (USD),
//! so no currency dimension is carried.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary value in cents.
///
/// Intermediate quote math (area times unit price) happens in `f64` and is
/// settled into cents exactly once per line item via [`Money::from_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn from_cents(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal dollar amount.
    ///
    /// ```
    /// use paver_quote::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Check if this is zero.
    pub const fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub const fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Get the absolute value.
    pub const fn abs(&self) -> Self {
        Self::from_cents(self.amount_cents.abs())
    }

    /// Convert to a decimal dollar value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Try to add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(Money::from_cents)
    }

    /// Try to multiply by an integer factor, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(Money::from_cents)
    }

    /// Multiply by a decimal factor, rounding to the nearest cent.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::from_cents((self.amount_cents as f64 * factor).round() as i64)
    }

    /// Calculate a percentage of this amount, rounded to the nearest cent.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.fold(Some(Money::zero()), |acc, m| acc?.try_add(m))
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.abs();
        format!("{}${}.{:02}", sign, abs.amount_cents / 100, abs.amount_cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents + other.amount_cents)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.amount_cents += other.amount_cents;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents - other.amount_cents)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money::from_cents(self.amount_cents * factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
