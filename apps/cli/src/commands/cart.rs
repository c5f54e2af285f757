//! Cart mutation commands.

use anyhow::{Context as _, Result};
use clap::Args;
use panier_core::{Money, NewProduct};
use panier_store::KeyValueStore;
use serde_json::json;

use super::Context;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product id (unique per product)
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price, e.g. 19.99 or 19,99
    #[arg(long)]
    pub price: String,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl AddArgs {
    pub fn to_product(&self) -> Result<NewProduct> {
        let price = Money::parse_decimal(&self.price)
            .with_context(|| format!("invalid price '{}'", self.price))?;
        let mut product = NewProduct::new(self.id.trim(), self.name.trim(), price);
        if let Some(image) = &self.image {
            product = product.with_image(image.trim());
        }
        Ok(product)
    }
}

pub fn add<S: KeyValueStore>(args: AddArgs, ctx: &mut Context<S>) -> Result<()> {
    let product = args.to_product()?;
    let cart = ctx
        .cart
        .add_item(&product)
        .with_context(|| format!("could not add '{}'", product.id))?;

    let quantity = cart.get(&product.id).map(|i| i.quantity).unwrap_or_default();
    ctx.emit(&cart, || {
        format!(
            "Added {} (now x{}). Cart: {} item(s).\n",
            product.name,
            quantity,
            cart.count()
        )
    })
}

pub fn remove<S: KeyValueStore>(id: &str, ctx: &mut Context<S>) -> Result<()> {
    let cart = ctx.cart.remove_item(id).context("could not update cart")?;
    ctx.emit(&cart, || format!("Cart: {} item(s).\n", cart.count()))
}

pub fn clear<S: KeyValueStore>(ctx: &mut Context<S>) -> Result<()> {
    ctx.cart.clear_cart().context("could not clear cart")?;
    ctx.emit(&json!({ "count": 0 }), || "Cart cleared.\n".to_string())
}

pub fn count<S: KeyValueStore>(ctx: &mut Context<S>) -> Result<()> {
    let count = ctx.cart.cart_count();
    ctx.emit(&json!({ "count": count }), || format!("{}\n", count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(price: &str) -> AddArgs {
        AddArgs {
            id: " p1 ".into(),
            name: "Shoes".into(),
            price: price.into(),
            image: Some("shoes.jpg".into()),
        }
    }

    #[test]
    fn test_to_product() {
        let product = args("19,99").to_product().unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.unit_price.cents(), 1999);
        assert_eq!(product.image_url.as_deref(), Some("shoes.jpg"));
    }

    #[test]
    fn test_to_product_bad_price() {
        let err = args("cheap").to_product().unwrap_err();
        assert!(err.to_string().contains("invalid price 'cheap'"));
    }
}
