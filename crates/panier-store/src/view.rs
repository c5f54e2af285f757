//! # View Model
//!
//! Plain data a renderer needs to draw the cart page. Amounts come both
//! as exact cents and pre-formatted, so a renderer never has to do money
//! math of its own.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  [img]  Chaussures de course         100,00 €   x2  Remove   │
//! │  [img]  Chaussettes                    9,99 €   x1  Remove   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Subtotal                                        209,99 €    │
//! │  active code: CCA15 (you save 31,50 €)                       │
//! │  Total                                           178,49 €    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use panier_core::{LineItem, Money, PriceFormatter, PromoResult};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One cart line, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
    /// The item's own image, or the placeholder.
    pub image_url: String,
    pub unit_price_display: String,
    pub line_total_display: String,
}

impl ItemView {
    pub fn new(item: &LineItem, formatter: &PriceFormatter, placeholder_image: &str) -> Self {
        ItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total(),
            image_url: item.image_or(placeholder_image).to_string(),
            unit_price_display: formatter.format(item.unit_price),
            line_total_display: formatter.format(item.line_total()),
        }
    }
}

/// Everything the cart page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartViewModel {
    pub items: Vec<ItemView>,
    /// Units across all lines (badge number).
    pub count: u32,
    pub subtotal: Money,
    /// Zero unless a code is active.
    pub discount: Money,
    pub total: Money,
    pub subtotal_display: String,
    pub discount_display: String,
    pub total_display: String,
    /// Set only while a code is active.
    pub promo_message: Option<String>,
    pub promo_is_valid: bool,
    /// The active code, for pre-filling the promo input.
    pub active_code: Option<String>,
    pub is_empty: bool,
}

/// What applying a promo code hands back for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromoOutcome {
    pub result: PromoResult,
    /// `result.message`, plus the savings when the code was accepted.
    pub display_message: String,
}
