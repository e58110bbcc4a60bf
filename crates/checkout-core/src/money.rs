//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    11 × 100.1 = 1101.0999999999999  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    11 × 10010 cents = 110110 cents = $1101.10                           │
//! │                                                                         │
//! │  Decimal prices from the catalog are parsed straight into cents,        │
//! │  never through f64.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::parse_decimal("49.99").unwrap();
//! assert_eq!(price.cents(), 4999);
//!
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "$149.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► LineItem.unit_price ──► line_total (qty × price)    │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                         subtotal ──► discount ──► total                 │
/// │                                                                         │
/// │  Every value shown in the order summary is derived, never stored       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a non-negative decimal amount such as `"12.5"` or `"1000"`.
    ///
    /// ## Rules
    /// - Digits with an optional `.` and fractional part
    /// - At most two significant fractional digits (`"9.990"` is fine)
    /// - No sign, no exponent
    ///
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.5").unwrap().cents(), 1250);
    /// assert_eq!(Money::parse_decimal("1000.0").unwrap().cents(), 100_000);
    /// assert!(Money::parse_decimal("-1").is_err());
    /// assert!(Money::parse_decimal("0.125").is_err());
    /// ```
    pub fn parse_decimal(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if raw.starts_with('-') {
            return Err(ValidationError::MustBeNonNegative {
                field: "price".to_string(),
            });
        }

        let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
        let frac = frac.trim_end_matches('0');

        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
            return Err(invalid_price(format!("expected a decimal amount, got '{raw}'")));
        }

        if frac.len() > 2 {
            return Err(invalid_price("at most 2 decimal places are allowed".to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| invalid_price("amount is too large".to_string()))?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(|| invalid_price("amount is too large".to_string()))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(30_00);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 90_00);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the cent.
    ///
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(1100_00);
    /// assert_eq!(subtotal.percentage(1000).cents(), 110_00); // 10%
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large subtotals from overflowing
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(part as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// let discounted = subtotal.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(discounted.cents(), 9000); // $90.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage(discount_bps)
    }
}

fn invalid_price(reason: String) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason,
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly dollar rendering. The app formats with its configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_parse_decimal_accepts_catalog_prices() {
        assert_eq!(Money::parse_decimal("100").unwrap().cents(), 10000);
        assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse_decimal("9.990").unwrap().cents(), 999);
        assert_eq!(Money::parse_decimal(" 7 ").unwrap().cents(), 700);
        assert_eq!(Money::parse_decimal("0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        assert!(matches!(
            Money::parse_decimal("-3.00"),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            Money::parse_decimal("1.234"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".5").is_err());
        assert!(Money::parse_decimal("1e3").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 10% of $1000.05 = $100.005 → $100.01
        assert_eq!(Money::from_cents(100_005).percentage(1000).cents(), 10_001);
        // 10% of $1000.01 = $100.001 → $100.00
        assert_eq!(Money::from_cents(100_001).percentage(1000).cents(), 10_000);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(1100_00);
        assert_eq!(subtotal.apply_percentage_discount(1000).cents(), 990_00);
    }
}
