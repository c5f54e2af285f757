//! # Validation Module
//!
//! Input validation for products entering the cart and promo codes typed
//! by the shopper.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page / CLI                                                   │
//! │  └── Parsing (a price string becomes Money or is refused)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Rules every cart line must satisfy                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart::from_items on load                                     │
//! │  └── Repairs quantity/duplicate invariants on stored data              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promo code that is merely *wrong* is not a validation failure; the
//! promo engine answers it with a normal negative result. Only input that
//! could never be a code (oversized) is refused here.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest accepted promo code input, after trimming.
pub const MAX_PROMO_INPUT_LEN: usize = 32;

/// Highest accepted unit price: 1 000 000,00 €.
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);

/// Highest `unit_price × quantity` a single line may reach: 100 000 000,00 €.
pub const MAX_LINE_TOTAL: Money = Money::from_cents(10_000_000_000);

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
///
/// ## Example
/// ```rust
/// use panier_core::validation::validate_product_id;
///
/// assert!(validate_product_id("sneaker-42").is_ok());
/// assert!(validate_product_id("   ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::required("id"));
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product name (1 to 200 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items), negative is not,
/// and nothing above [`MAX_UNIT_PRICE`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates raw promo code input and returns it trimmed.
///
/// Empty input is allowed through; the caller decides what "no code"
/// means.
pub fn validate_promo_input(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.chars().count() > MAX_PROMO_INPUT_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_INPUT_LEN,
        });
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("p1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("  ").is_err());
        assert!(validate_product_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Chaussures de course").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1999)).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(-1)),
            Err(ValidationError::Negative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_price_upper_bound() {
        assert!(validate_price(MAX_UNIT_PRICE).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_UNIT_PRICE.cents() + 1)),
            Err(ValidationError::TooLarge { .. })
        ));

        let huge = Money::parse_decimal("92233720368547758").unwrap();
        assert!(validate_price(huge).is_err());
    }

    #[test]
    fn test_validate_promo_input() {
        assert_eq!(validate_promo_input("  cca15 "), Ok("cca15"));
        assert_eq!(validate_promo_input(""), Ok(""));
        assert!(validate_promo_input(&"A".repeat(40)).is_err());
    }
}
