use anyhow::{Context as _, Result};
use panier_store::KeyValueStore;

use super::Context;

pub fn apply<S: KeyValueStore>(code: &str, ctx: &mut Context<S>) -> Result<()> {
    let outcome = ctx
        .cart
        .apply_promo_code(code)
        .context("could not store promo code")?;
    ctx.emit(&outcome, || format!("{}\n", outcome.display_message))
}
