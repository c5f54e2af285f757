//! # Cart Store
//!
//! Sole owner of the persisted cart and promo code.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Operation        Key touched            Side effect                    │
//! │  ─────────        ───────────            ───────────                    │
//! │  load()           read  "cart-data"      corrupt → warn, empty cart     │
//! │  save(cart)       write "cart-data"      notify observers (count)       │
//! │  add(cart, p)     write "cart-data"      notify observers               │
//! │  remove(cart, id) write "cart-data"      notify observers               │
//! │  clear()          delete both keys       notify observers (0)           │
//! │  load_promo()     read  "promo-code"     unreadable → warn, None        │
//! │  save_promo(c)    write "promo-code"                                    │
//! │  clear_promo()    delete "promo-code"                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use panier_core::{Cart, LineItem, NewProduct};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::kv::{KeyValueStore, CART_KEY, PROMO_KEY};

// =============================================================================
// Observers
// =============================================================================

/// Told the new item count whenever the persisted cart changes.
///
/// The typical observer is a header badge. Any `FnMut(u32)` closure is an
/// observer.
pub trait CountObserver {
    fn count_changed(&mut self, count: u32);
}

impl<F: FnMut(u32)> CountObserver for F {
    fn count_changed(&mut self, count: u32) {
        self(count)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

pub struct CartStore<S> {
    backend: S,
    observers: Vec<Box<dyn CountObserver>>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(backend: S) -> Self {
        CartStore {
            backend,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for count changes.
    pub fn subscribe(&mut self, observer: impl CountObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Reads the persisted cart.
    ///
    /// Missing, unreadable and unparseable data all come back as an empty
    /// cart; the problem is logged, never returned.
    pub fn load(&self) -> Cart {
        let raw = match self.backend.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(error = %e, key = CART_KEY, "Failed to read cart, using empty cart");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => {
                let read = items.len();
                let cart = Cart::from_items(items);
                if cart.len() != read {
                    warn!(read, kept = cart.len(), "Repaired stored cart lines");
                }
                cart
            }
            Err(e) => {
                warn!(error = %e, key = CART_KEY, "Stored cart is corrupt, using empty cart");
                Cart::new()
            }
        }
    }

    /// Persists the full cart, replacing what was stored, and notifies
    /// observers of the new count.
    pub fn save(&mut self, cart: &Cart) -> StoreResult<()> {
        let json = serde_json::to_string(cart)?;
        self.backend.set(CART_KEY, &json)?;
        debug!(lines = cart.len(), count = cart.count(), "Cart saved");
        self.notify(cart.count());
        Ok(())
    }

    /// Adds one unit of `product` to `cart` and persists the result.
    ///
    /// An invalid product leaves both `cart` and storage untouched.
    pub fn add(&mut self, mut cart: Cart, product: &NewProduct) -> StoreResult<Cart> {
        cart.add(product)?;
        debug!(id = %product.id, "Item added to cart");
        self.save(&cart)?;
        Ok(cart)
    }

    /// Removes every line with `id` and persists the result. Removing an id
    /// that is not in the cart still saves (and notifies) but changes
    /// nothing.
    pub fn remove(&mut self, mut cart: Cart, id: &str) -> StoreResult<Cart> {
        if cart.remove(id) {
            debug!(id, "Item removed from cart");
        } else {
            debug!(id, "Remove of an item not in cart ignored");
        }
        self.save(&cart)?;
        Ok(cart)
    }

    /// Deletes the cart and the promo code, then notifies observers with 0.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.backend.remove(CART_KEY)?;
        self.backend.remove(PROMO_KEY)?;
        debug!("Cart and promo code cleared");
        self.notify(0);
        Ok(())
    }

    /// Sum of all quantities in `cart`.
    pub fn count(&self, cart: &Cart) -> u32 {
        cart.count()
    }

    /// Reads the stored promo code, if any. Read failures count as no code.
    pub fn load_promo(&self) -> Option<String> {
        match self.backend.get(PROMO_KEY) {
            Ok(code) => code.filter(|c| !c.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, key = PROMO_KEY, "Failed to read promo code, ignoring it");
                None
            }
        }
    }

    pub fn save_promo(&mut self, code: &str) -> StoreResult<()> {
        self.backend.set(PROMO_KEY, code)
    }

    pub fn clear_promo(&mut self) -> StoreResult<()> {
        self.backend.remove(PROMO_KEY)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn notify(&mut self, count: u32) {
        for observer in &mut self.observers {
            observer.count_changed(count);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("backend", &self.backend)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
