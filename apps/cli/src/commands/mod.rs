//! # Commands
//!
//! One subcommand per public cart operation.
//!
//! ```text
//! panier add --id p1 --name "Shoes" --price 100.00   add_item
//! panier remove p1                                   remove_item
//! panier clear                                       clear_cart
//! panier count                                       cart_count
//! panier promo cca15                                 apply_promo_code
//! panier show [--json]                               view_model
//! panier format 19.999                               format_price
//! ```

pub mod cart;
pub mod promo;
pub mod view;

use anyhow::Result;
use clap::Subcommand;
use panier_store::{CartController, KeyValueStore};
use serde::Serialize;

pub use cart::AddArgs;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Remove a product line from the cart
    Remove {
        /// Product id
        id: String,
    },

    /// Empty the cart and forget the promo code
    Clear,

    /// Print the number of items in the cart
    Count,

    /// Apply a promo code
    Promo {
        /// The code as typed (case and surrounding spaces are ignored)
        code: String,
    },

    /// Show the cart
    Show,

    /// Format an amount the way the cart displays prices
    Format {
        /// Decimal amount, e.g. 19.99 or 19,99
        amount: String,
    },
}

/// Everything a command needs: the cart and how to print.
pub struct Context<S> {
    pub cart: CartController<S>,
    pub json: bool,
}

impl<S: KeyValueStore> Context<S> {
    pub fn new(cart: CartController<S>, json: bool) -> Self {
        Context { cart, json }
    }

    /// Prints `value` as JSON in `--json` mode, else prints `text()`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

pub fn run<S: KeyValueStore>(command: Command, ctx: &mut Context<S>) -> Result<()> {
    match command {
        Command::Add(args) => cart::add(args, ctx),
        Command::Remove { id } => cart::remove(&id, ctx),
        Command::Clear => cart::clear(ctx),
        Command::Count => cart::count(ctx),
        Command::Promo { code } => promo::apply(&code, ctx),
        Command::Show => view::show(ctx),
        Command::Format { amount } => view::format(&amount, ctx),
    }
}
