//! Read-side commands.

use anyhow::{Context as _, Result};
use panier_core::Money;
use panier_store::KeyValueStore;
use serde_json::json;

use super::Context;
use crate::render::render_cart;

pub fn show<S: KeyValueStore>(ctx: &mut Context<S>) -> Result<()> {
    // Building the view can drop a stale promo code, hence &mut.
    let view = ctx.cart.view_model();
    ctx.emit(&view, || render_cart(&view))
}

pub fn format<S: KeyValueStore>(amount: &str, ctx: &mut Context<S>) -> Result<()> {
    let money = Money::parse_decimal(amount)
        .with_context(|| format!("invalid amount '{}'", amount))?;
    let formatted = ctx.cart.format_price(money);
    ctx.emit(
        &json!({ "cents": money.cents(), "formatted": formatted }),
        || format!("{}\n", formatted),
    )
}
