//! # Domain Types
//!
//! The cart and what goes in it.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  add   ┌─────────────────┐        ┌────────────┐  │
//! │  │   NewProduct    │ ─────► │    LineItem     │ ◄───── │    Cart    │  │
//! │  │  ─────────────  │        │  ─────────────  │  0..n  │ (ordered)  │  │
//! │  │  id             │        │  id (unique)    │        └────────────┘  │
//! │  │  name           │        │  name           │                        │
//! │  │  unit_price     │        │  unit_price     │                        │
//! │  │  image_url?     │        │  quantity ≥ 1   │                        │
//! │  └─────────────────┘        │  image_url?     │                        │
//! │                             └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A cart never holds two lines with the same `id`; adding a product
//!   that is already present bumps its quantity instead.
//! - Every line has `quantity >= 1`.
//! - Insertion order is preserved.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_id, validate_product_name, MAX_LINE_TOTAL,
};

// =============================================================================
// New Product
// =============================================================================

/// The payload of an add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
}

impl NewProduct {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        NewProduct {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Checks id, name and price before the product may enter a cart.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_product_id(&self.id)?;
        validate_product_name(&self.name)?;
        validate_price(self.unit_price)?;
        Ok(())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line in the cart.
///
/// The name, price and image are copied from the product at the time it
/// was first added, so the cart keeps showing what the shopper picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
}

impl LineItem {
    fn from_product(product: &NewProduct) -> Self {
        LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            image_url: product
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// unit price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// The item's image, or `placeholder` when it was added without one.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image_url.as_deref().unwrap_or(placeholder)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered collection of line items.
///
/// Serializes as a plain JSON array of line items, which is exactly what
/// gets persisted under the cart key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    pub fn new() -> Self {
        Cart(Vec::new())
    }

    /// Builds a cart from raw items, restoring the invariants.
    ///
    /// Lines with quantity 0 are dropped and repeated ids are folded into
    /// the first occurrence. Used on data read back from storage, which may
    /// have been written by something less careful than [`Cart::add`].
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match cart.0.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.0.push(item),
            }
        }
        cart
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by one
    /// - Product not in cart: appended with quantity 1
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] if the product fails validation
    /// - [`CoreError::QuantityOverflow`] if the line is already at `u32::MAX`
    /// - [`CoreError::AmountOverflow`] if the line total would pass
    ///   [`MAX_LINE_TOTAL`]
    pub fn add(&mut self, product: &NewProduct) -> CoreResult<()> {
        product.validate()?;

        if let Some(item) = self.0.iter_mut().find(|i| i.id == product.id) {
            let quantity = item
                .quantity
                .checked_add(1)
                .ok_or_else(|| CoreError::QuantityOverflow {
                    id: product.id.clone(),
                })?;
            let within_limit = item
                .unit_price
                .checked_multiply_quantity(quantity)
                .is_some_and(|total| total <= MAX_LINE_TOTAL);
            if !within_limit {
                return Err(CoreError::AmountOverflow {
                    id: product.id.clone(),
                    max: MAX_LINE_TOTAL,
                });
            }
            item.quantity = quantity;
            return Ok(());
        }

        self.0.push(LineItem::from_product(product));
        Ok(())
    }

    /// Removes every line with this id. Removing an id that is not in the
    /// cart is a no-op; the return value says whether anything changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|i| i.id != id);
        self.0.len() != before
    }

    /// Total number of units across all lines (the header badge number).
    pub fn count(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of `unit_price × quantity` over all lines, saturating rather
    /// than overflowing on out-of-range stored data.
    pub fn subtotal(&self) -> Money {
        self.0.iter().map(LineItem::line_total).sum()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.0.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, cents: i64) -> NewProduct {
        NewProduct::new(id, format!("Product {}", id), Money::from_cents(cents))
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 999)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.subtotal().cents(), 999);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let p = product("p1", 999);

        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.len(), 1); // Still one line
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&product("b", 100)).unwrap();
        cart.add(&product("a", 100)).unwrap();
        cart.add(&product("b", 100)).unwrap();

        let ids: Vec<&str> = cart.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_rejects_invalid_product() {
        let mut cart = Cart::new();
        let err = cart.add(&product("", 100)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(cart.is_empty());

        let err = cart.add(&product("p1", -1)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_add_overflow() {
        let mut cart = Cart::from_items(vec![LineItem {
            id: "p1".into(),
            name: "Product".into(),
            unit_price: Money::from_cents(1),
            quantity: u32::MAX,
            image_url: None,
        }]);
        let err = cart.add(&product("p1", 1)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityOverflow { .. }));
        assert_eq!(cart.get("p1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_add_refuses_line_total_past_limit() {
        let unit = Money::from_cents(MAX_LINE_TOTAL.cents() / 2);
        let mut cart = Cart::from_items(vec![LineItem {
            id: "p1".into(),
            name: "Product".into(),
            unit_price: unit,
            quantity: 2,
            image_url: None,
        }]);

        let err = cart.add(&product("p1", 1)).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
        assert_eq!(cart.subtotal(), MAX_LINE_TOTAL);
    }

    #[test]
    fn test_out_of_range_stored_lines_saturate() {
        let line = |id: &str| LineItem {
            id: id.into(),
            name: id.into(),
            unit_price: Money::from_cents(i64::MAX / 2),
            quantity: 3,
            image_url: None,
        };
        let cart = Cart::from_items(vec![line("a"), line("b")]);

        assert_eq!(cart.get("a").unwrap().line_total().cents(), i64::MAX);
        assert_eq!(cart.subtotal().cents(), i64::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100)).unwrap();
        cart.add(&product("p2", 100)).unwrap();

        assert!(cart.remove("p1"));
        assert_eq!(cart.len(), 1);
        assert!(cart.get("p1").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100)).unwrap();
        let before = cart.clone();

        assert!(!cart.remove("nope"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_blank_image_is_dropped() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100).with_image("  ")).unwrap();
        let item = cart.get("p1").unwrap();
        assert_eq!(item.image_url, None);
        assert_eq!(item.image_or("placeholder.png"), "placeholder.png");
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let line = |id: &str, qty: u32| LineItem {
            id: id.to_string(),
            name: id.to_string(),
            unit_price: Money::from_cents(100),
            quantity: qty,
            image_url: None,
        };
        let cart = Cart::from_items(vec![line("a", 1), line("b", 0), line("a", 2), line("c", 1)]);

        let summary: Vec<(&str, u32)> = cart.iter().map(|i| (i.id.as_str(), i.quantity)).collect();
        assert_eq!(summary, vec![("a", 3), ("c", 1)]);
    }

    #[test]
    fn test_json_shape() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1999).with_image("p1.jpg")).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "p1",
                "name": "Product p1",
                "unitPrice": 1999,
                "quantity": 1,
                "imageUrl": "p1.jpg"
            }])
        );
    }

    proptest! {
        #[test]
        fn prop_subtotal_is_sum_of_lines(lines in proptest::collection::vec((0i64..100_000, 1u32..50), 0..20)) {
            let items: Vec<LineItem> = lines
                .iter()
                .enumerate()
                .map(|(n, (cents, qty))| LineItem {
                    id: format!("p{}", n),
                    name: format!("Product {}", n),
                    unit_price: Money::from_cents(*cents),
                    quantity: *qty,
                    image_url: None,
                })
                .collect();
            let expected: i64 = lines.iter().map(|(c, q)| c * i64::from(*q)).sum();
            let cart = Cart::from_items(items);
            prop_assert_eq!(cart.subtotal().cents(), expected);
        }
    }
}
