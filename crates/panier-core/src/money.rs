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
//! │    19.99 × 3 = 59.96999999999999  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents  → "59,97 €"                            │
//! │                                                                         │
//! │  Rounding only happens where a fraction of a cent can appear:          │
//! │    • parsing a decimal string with more than two digits               │
//! │    • taking a percentage (the promo discount)                          │
//! │  and both places round half-up at the cent.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use panier_core::money::Money;
//!
//! let price = Money::from_cents(1999); // 19,99 €
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 5997);
//!
//! let parsed = Money::parse_decimal("19,99").unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::format::format_price;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Serialized as a bare integer so the persisted cart and the view model
/// both carry exact amounts; the renderer formats them (or asks
/// [`crate::format::PriceFormatter`] to).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit (euro) portion, truncated toward zero.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Takes a percentage of this amount, rounding half-up at the cent.
    ///
    /// ## Arguments
    /// * `bps` - Rate in basis points (1500 = 15%)
    ///
    /// ## Example
    /// ```rust
    /// use panier_core::money::Money;
    ///
    /// // 15% of 59,97 € = 8,9955 € → 9,00 €
    /// assert_eq!(Money::from_cents(5997).percentage(1500).cents(), 900);
    /// // 15% of 0,10 € = 0,015 € → 0,02 € (the half goes up)
    /// assert_eq!(Money::from_cents(10).percentage(1500).cents(), 2);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // floor(x / 10000 + 1/2) == floor((2x + 10000) / 20000); div_euclid
        // keeps "up" meaning toward +∞ for negative amounts as well.
        let scaled = self.0 as i128 * bps as i128;
        let rounded = (2 * scaled + 10_000).div_euclid(20_000);
        Money(rounded as i64)
    }

    /// Parses a decimal amount such as `"19.99"`, `"19,99"` or `"200"`.
    ///
    /// Both `.` and `,` are accepted as the decimal separator. Digits past
    /// the second fractional place are rounded half-up at the cent, so
    /// `"0.005"` parses to one cent. Negative amounts are rejected since
    /// no price in the cart may be below zero.
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        const FIELD: &str = "amount";

        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::required(FIELD));
        }
        if input.starts_with('-') {
            return Err(ValidationError::Negative {
                field: FIELD.to_string(),
            });
        }
        let input = input.strip_prefix('+').unwrap_or(input);

        let (whole, fraction) = match input.find(['.', ',']) {
            Some(idx) => (&input[..idx], &input[idx + 1..]),
            None => (input, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(ValidationError::invalid_format(FIELD, "not a decimal number"));
        }

        let too_large = || ValidationError::invalid_format(FIELD, "amount is too large");

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };

        let digits: Vec<i64> = fraction
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .map(Money)
            .ok_or_else(too_large)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the shop's locale format ("199,00 €").
///
/// The arithmetic below saturates instead of wrapping: stored carts are
/// read back from outside the process and must never panic a view.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_price(*self))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
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
