//! # panier-core: Pure Cart Logic for Panier
//!
//! This crate holds the rules of the shopping cart as pure functions with
//! zero I/O dependencies. Persistence lives in `panier-store`; drawing the
//! cart on a page is somebody else's job entirely.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Panier Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Renderer (web page, CLI, ...)                   │   │
//! │  │           consumes CartViewModel, draws it, nothing else        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ view model                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            panier-store (CartStore + CartController)            │   │
//! │  │               key-value persistence, use cases                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ panier-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   promo   │  │  format   │  │   │
//! │  │   │ LineItem  │  │   Money   │  │PromoEngine│  │ Price     │  │   │
//! │  │   │   Cart    │  │ half-up   │  │PromoResult│  │ Formatter │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, the cart, the add-to-cart payload
//! - [`money`] - Money type with integer cents (no floating point!)
//! - [`format`] - Locale formatting of prices ("199,00 €")
//! - [`promo`] - The promo code engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use panier_core::{format_price, Cart, Money, NewProduct, PromoEngine};
//!
//! let mut cart = Cart::new();
//! let shoes = NewProduct::new("p1", "Shoes", Money::from_cents(10000));
//! cart.add(&shoes).unwrap();
//! cart.add(&shoes).unwrap();
//!
//! let result = PromoEngine::default().evaluate(&cart, Some("cca15"));
//! assert!(result.is_valid);
//! assert_eq!(format_price(result.final_total), "170,00 €");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod money;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_price, PriceFormatter};
pub use money::Money;
pub use promo::{PromoEngine, PromoResult, PromoRule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The one promo code the shop recognises out of the box.
pub const DEFAULT_PROMO_CODE: &str = "CCA15";

/// Discount granted by [`DEFAULT_PROMO_CODE`], in basis points (15%).
pub const DEFAULT_PROMO_RATE_BPS: u32 = 1500;

/// Image shown for items that were added without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200x200?text=Produit";
