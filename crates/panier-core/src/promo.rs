//! # Promo Engine
//!
//! Evaluates a promo code against a cart. Pure: it reads the cart and the
//! code it is handed and never stores anything.
//!
//! ## Promo Slot State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            apply valid code                                             │
//! │  ┌────────┐ ───────────────────► ┌────────────┐                        │
//! │  │ NoCode │                      │ CodeActive │ ──┐ cart changes,      │
//! │  └────────┘ ◄─────────────────── └────────────┘ ◄─┘ still valid        │
//! │       ▲      apply invalid code        │                                │
//! │       │      clear cart                │ cart changes, reconcile        │
//! │       │                                │ finds it no longer valid       │
//! │       └────────────────────────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! `discount = half_up(subtotal × rate)` and `final = subtotal − discount`.
//! Both are whole cents, so the two always add back up to the subtotal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::PriceFormatter;
use crate::money::Money;
use crate::types::Cart;
use crate::{DEFAULT_PROMO_CODE, DEFAULT_PROMO_RATE_BPS};

pub const MSG_NO_CODE: &str = "no code applied";
pub const MSG_INVALID_CODE: &str = "invalid code";
pub const MSG_EMPTY_CART: &str = "cart is empty";

// =============================================================================
// Promo Rule
// =============================================================================

/// The single code the shop accepts and what it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoRule {
    /// Stored normalized (trimmed, uppercase).
    pub code: String,
    /// Discount in basis points (1500 = 15%).
    pub rate_bps: u32,
}

impl PromoRule {
    pub fn new(code: &str, rate_bps: u32) -> Self {
        PromoRule {
            code: PromoEngine::normalize(code),
            rate_bps,
        }
    }

    /// "15" for 1500 bps, "12.5" for 1250 bps.
    pub fn percent_label(&self) -> String {
        let whole = self.rate_bps / 100;
        let frac = self.rate_bps % 100;
        if frac == 0 {
            whole.to_string()
        } else if frac % 10 == 0 {
            format!("{}.{}", whole, frac / 10)
        } else {
            format!("{}.{:02}", whole, frac)
        }
    }
}

impl Default for PromoRule {
    fn default() -> Self {
        PromoRule::new(DEFAULT_PROMO_CODE, DEFAULT_PROMO_RATE_BPS)
    }
}

// =============================================================================
// Promo Result
// =============================================================================

/// Outcome of evaluating a code. Recomputed every time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromoResult {
    pub is_valid: bool,
    pub discount_amount: Money,
    pub final_total: Money,
    pub message: String,
}

impl PromoResult {
    /// A negative result: nothing off, total is the subtotal.
    pub fn rejected(subtotal: Money, message: &str) -> Self {
        PromoResult {
            is_valid: false,
            discount_amount: Money::zero(),
            final_total: subtotal,
            message: message.to_string(),
        }
    }

    /// The message plus how much the shopper saves, for a valid result:
    /// `"code applied: -15% (you save 30,00 €)"`. Negative results keep
    /// their plain message.
    pub fn message_with_savings(&self, formatter: &PriceFormatter) -> String {
        if self.is_valid {
            format!(
                "{} (you save {})",
                self.message,
                formatter.format(self.discount_amount)
            )
        } else {
            self.message.clone()
        }
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// What a stored code turns into against the current cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The code to keep stored; `None` means the slot should be cleared.
    pub code: Option<String>,
    pub result: PromoResult,
}

impl Reconciled {
    /// True when a stored code was found invalid and must be dropped.
    pub fn dropped(&self, stored: Option<&str>) -> bool {
        stored.is_some() && self.code.is_none()
    }
}

// =============================================================================
// Promo Engine
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoEngine {
    rule: PromoRule,
}

impl PromoEngine {
    pub fn new(rule: PromoRule) -> Self {
        PromoEngine { rule }
    }

    pub fn rule(&self) -> &PromoRule {
        &self.rule
    }

    /// Trims surrounding whitespace and uppercases.
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    pub fn subtotal(&self, cart: &Cart) -> Money {
        cart.subtotal()
    }

    /// Evaluates `code` against `cart`.
    ///
    /// ## Outcomes
    /// - `None` or `""` → not valid, `"no code applied"`
    /// - matches the rule (case and surrounding whitespace ignored) →
    ///   valid, discount taken off the subtotal
    /// - anything else → not valid, `"invalid code"`
    ///
    /// ## Example
    /// ```rust
    /// use panier_core::{Cart, Money, NewProduct, PromoEngine};
    ///
    /// let mut cart = Cart::new();
    /// let p = NewProduct::new("p1", "Shoes", Money::from_cents(10000));
    /// cart.add(&p).unwrap();
    /// cart.add(&p).unwrap();
    ///
    /// let result = PromoEngine::default().evaluate(&cart, Some(" CCA15 "));
    /// assert!(result.is_valid);
    /// assert_eq!(result.discount_amount.cents(), 3000);
    /// assert_eq!(result.final_total.cents(), 17000);
    /// ```
    pub fn evaluate(&self, cart: &Cart, code: Option<&str>) -> PromoResult {
        let subtotal = self.subtotal(cart);

        let code = match code {
            Some(code) if !code.is_empty() => code,
            _ => return PromoResult::rejected(subtotal, MSG_NO_CODE),
        };

        if Self::normalize(code) != self.rule.code {
            return PromoResult::rejected(subtotal, MSG_INVALID_CODE);
        }

        let discount_amount = subtotal.percentage(self.rule.rate_bps);
        PromoResult {
            is_valid: true,
            discount_amount,
            final_total: subtotal - discount_amount,
            message: format!("code applied: -{}%", self.rule.percent_label()),
        }
    }

    /// The result handed back when a code is tried on an empty cart.
    pub fn empty_cart(&self) -> PromoResult {
        PromoResult::rejected(Money::zero(), MSG_EMPTY_CART)
    }

    /// Re-checks a stored code against the current cart.
    ///
    /// A code survives only if the cart is non-empty and the code still
    /// evaluates as valid; otherwise the returned `code` is `None` and the
    /// caller clears its stored slot. With nothing stored this is simply
    /// the no-code evaluation.
    pub fn reconcile(&self, cart: &Cart, stored: Option<&str>) -> Reconciled {
        let Some(stored) = stored else {
            return Reconciled {
                code: None,
                result: self.evaluate(cart, None),
            };
        };

        if cart.is_empty() {
            return Reconciled {
                code: None,
                result: self.empty_cart(),
            };
        }

        let result = self.evaluate(cart, Some(stored));
        let code = result.is_valid.then(|| Self::normalize(stored));
        Reconciled { code, result }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
