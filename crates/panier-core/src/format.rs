//! # Price Formatting
//!
//! Turns a [`Money`] amount into the string shown to shoppers.
//!
//! ```text
//!   Money::from_cents(19900) ──► "199,00 €"
//!   Money::from_cents(5)     ──► "0,05 €"
//! ```
//!
//! The amount is already whole cents, so formatting never rounds; the
//! half-up rounding to the cent happens earlier, in [`Money::parse_decimal`]
//! and [`Money::percentage`].

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Fixed-locale price formatter.
///
/// Defaults to a comma decimal separator and a trailing euro sign, which
/// is the format the shop's pages use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFormatter {
    pub decimal_separator: char,
    pub currency_marker: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        PriceFormatter {
            decimal_separator: ',',
            currency_marker: "€".to_string(),
        }
    }
}

impl PriceFormatter {
    pub fn new(decimal_separator: char, currency_marker: impl Into<String>) -> Self {
        PriceFormatter {
            decimal_separator,
            currency_marker: currency_marker.into(),
        }
    }

    /// Formats an amount with exactly two fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use panier_core::{Money, PriceFormatter};
    ///
    /// let fmt = PriceFormatter::default();
    /// assert_eq!(fmt.format(Money::from_cents(17000)), "170,00 €");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}{:02} {}",
            sign,
            amount.units().abs(),
            self.decimal_separator,
            amount.cents_part(),
            self.currency_marker
        )
    }
}

/// Formats with the default shop locale (`"199,00 €"`).
pub fn format_price(amount: Money) -> String {
    PriceFormatter::default().format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Money::from_cents(19900)), "199,00 €");
        assert_eq!(format_price(Money::from_cents(5997)), "59,97 €");
        assert_eq!(format_price(Money::from_cents(5)), "0,05 €");
        assert_eq!(format_price(Money::zero()), "0,00 €");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_price(Money::from_cents(-550)), "-5,50 €");
        assert_eq!(format_price(Money::from_cents(-5)), "-0,05 €");
    }

    #[test]
    fn test_custom_formatter() {
        let fmt = PriceFormatter::new('.', "EUR");
        assert_eq!(fmt.format(Money::from_cents(1234)), "12.34 EUR");
    }

    proptest! {
        #[test]
        fn prop_comma_and_two_fraction_digits(cents in 0i64..10_000_000_000) {
            let s = format_price(Money::from_cents(cents));
            let number = s.strip_suffix(" €").expect("currency marker");
            let (whole, fraction) = number.split_once(',').expect("comma separator");
            prop_assert_eq!(fraction.len(), 2);
            prop_assert!(!number.contains('.'));
            let rebuilt: i64 = whole.parse::<i64>().unwrap() * 100 + fraction.parse::<i64>().unwrap();
            prop_assert_eq!(rebuilt, cents);
        }
    }
}
