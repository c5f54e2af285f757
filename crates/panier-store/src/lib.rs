//! # panier-store: Persistence and Use Cases for Panier
//!
//! This crate sits between the pure cart logic in `panier-core` and
//! whatever application drives the cart. It persists the cart and the promo
//! code in a key-value store and exposes the shop-facing operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI event (click, form submit)                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌─────────────────────────┐      ┌──────────────────────────┐         │
//! │  │     CartController      │─────►│ PromoEngine (panier-core)│         │
//! │  │  add / remove / clear   │      │ evaluate / reconcile     │         │
//! │  │  apply promo / view     │      └──────────────────────────┘         │
//! │  └───────────┬─────────────┘                                            │
//! │              │                                                          │
//! │  ┌───────────▼─────────────┐      ┌──────────────────────────┐         │
//! │  │       CartStore         │─────►│  CountObserver (badge)   │         │
//! │  │  "cart-data"            │      └──────────────────────────┘         │
//! │  │  "promo-code"           │                                            │
//! │  └───────────┬─────────────┘                                            │
//! │              │ KeyValueStore                                            │
//! │   ┌──────────┴──────────┐                                               │
//! │   ▼                     ▼                                               │
//! │ MemoryStore         FileStore (JSON document on disk)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValueStore` trait and the two storage keys
//! - [`memory`] - In-memory backend (tests, ephemeral sessions)
//! - [`file`] - JSON file backend
//! - [`cart_store`] - `CartStore`, sole writer of cart and promo state
//! - [`controller`] - `CartController`, the public cart API
//! - [`view`] - Render-ready view model
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use panier_core::{Money, NewProduct};
//! use panier_store::{CartController, CartStore, MemoryStore};
//!
//! let mut cart = CartController::new(CartStore::new(MemoryStore::new()));
//! cart.add_item(&NewProduct::new("p1", "Shoes", Money::from_cents(10000))).unwrap();
//! cart.add_item(&NewProduct::new("p1", "Shoes", Money::from_cents(10000))).unwrap();
//!
//! let outcome = cart.apply_promo_code("cca15").unwrap();
//! assert!(outcome.result.is_valid);
//!
//! let view = cart.view_model();
//! assert_eq!(view.total_display, "170,00 €");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod controller;
pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, CountObserver};
pub use controller::CartController;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use kv::{KeyValueStore, CART_KEY, PROMO_KEY};
pub use memory::MemoryStore;
pub use view::{CartViewModel, ItemView, PromoOutcome};
