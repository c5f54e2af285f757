//! # Cart Controller
//!
//! The operations the surrounding application calls. Each one runs to
//! completion against the store before the next event is handled.
//!
//! ## Use Cases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(product)      load ─► CartStore::add ─► Cart                  │
//! │  remove_item(id)        load ─► CartStore::remove ─► Cart               │
//! │  clear_cart()           CartStore::clear                                │
//! │  cart_count()           load ─► count                                   │
//! │  apply_promo_code(c)    load ─► PromoEngine::evaluate ─► save/clear     │
//! │                         code ─► PromoOutcome                            │
//! │  view_model()           load cart + code ─► PromoEngine::reconcile      │
//! │                         ─► drop code if stale ─► CartViewModel          │
//! │  format_price(amount)   PriceFormatter::format                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removing items or clearing the cart never re-checks the promo code on
//! the spot. The check happens the next time a view model is built.

use panier_core::promo::MSG_INVALID_CODE;
use panier_core::validation::validate_promo_input;
use panier_core::{
    Cart, Money, NewProduct, PriceFormatter, PromoEngine, PromoResult, PLACEHOLDER_IMAGE_URL,
};
use tracing::{debug, info, warn};

use crate::cart_store::CartStore;
use crate::error::StoreResult;
use crate::kv::KeyValueStore;
use crate::view::{CartViewModel, ItemView, PromoOutcome};

#[derive(Debug)]
pub struct CartController<S> {
    store: CartStore<S>,
    engine: PromoEngine,
    formatter: PriceFormatter,
    placeholder_image: String,
}

impl<S: KeyValueStore> CartController<S> {
    /// A controller with the default promo rule, price format and
    /// placeholder image.
    pub fn new(store: CartStore<S>) -> Self {
        CartController {
            store,
            engine: PromoEngine::default(),
            formatter: PriceFormatter::default(),
            placeholder_image: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    pub fn with_engine(mut self, engine: PromoEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_formatter(mut self, formatter: PriceFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of `product`, merging with an existing line.
    pub fn add_item(&mut self, product: &NewProduct) -> StoreResult<Cart> {
        let cart = self.store.load();
        self.store.add(cart, product)
    }

    /// Removes the line with `id`. A missing id is not an error.
    pub fn remove_item(&mut self, id: &str) -> StoreResult<Cart> {
        let cart = self.store.load();
        self.store.remove(cart, id)
    }

    /// Empties the cart and forgets the promo code.
    pub fn clear_cart(&mut self) -> StoreResult<()> {
        info!("Clearing cart");
        self.store.clear()
    }

    pub fn cart_count(&self) -> u32 {
        self.store.count(&self.store.load())
    }

    // =========================================================================
    // Promo Code
    // =========================================================================

    /// Tries `code` against the current cart.
    ///
    /// ## Behavior
    /// - Empty cart → `"cart is empty"`, nothing stored
    /// - Valid code → normalized code stored
    /// - Anything else → stored code (if any) cleared
    ///
    /// A rejected code is a normal result, never an error; only a failed
    /// write to the store is.
    pub fn apply_promo_code(&mut self, code: &str) -> StoreResult<PromoOutcome> {
        let cart = self.store.load();

        if cart.is_empty() {
            debug!("Promo code tried on an empty cart");
            return Ok(self.outcome(self.engine.empty_cart()));
        }

        let result = match validate_promo_input(code) {
            Ok(_) => self.engine.evaluate(&cart, Some(code)),
            Err(e) => {
                debug!(error = %e, "Promo input refused");
                PromoResult::rejected(cart.subtotal(), MSG_INVALID_CODE)
            }
        };

        if result.is_valid {
            let normalized = PromoEngine::normalize(code);
            info!(code = %normalized, discount = result.discount_amount.cents(), "Promo code applied");
            self.store.save_promo(&normalized)?;
        } else {
            info!(message = %result.message, "Promo code rejected");
            self.store.clear_promo()?;
        }

        Ok(self.outcome(result))
    }

    fn outcome(&self, result: PromoResult) -> PromoOutcome {
        PromoOutcome {
            display_message: result.message_with_savings(&self.formatter),
            result,
        }
    }

    // =========================================================================
    // View Model
    // =========================================================================

    /// Builds what the cart page shows.
    ///
    /// A stored code is re-checked against the current cart first. If it no
    /// longer holds (the cart was emptied, or the shop's code changed) it is
    /// removed from storage and the total falls back to the subtotal.
    ///
    /// Never fails. If the stale code cannot be removed the view still shows
    /// no active code; the removal is retried on the next build.
    pub fn view_model(&mut self) -> CartViewModel {
        let cart = self.store.load();
        let stored = self.store.load_promo();

        let reconciled = self.engine.reconcile(&cart, stored.as_deref());
        if reconciled.dropped(stored.as_deref()) {
            warn!(
                code = stored.as_deref().unwrap_or_default(),
                reason = %reconciled.result.message,
                "Stored promo code no longer applies, dropping it"
            );
            if let Err(e) = self.store.clear_promo() {
                warn!(error = %e, "Failed to drop stale promo code");
            }
        }

        let subtotal = cart.subtotal();
        let (discount, total, promo_message) = match &reconciled.code {
            Some(code) => (
                reconciled.result.discount_amount,
                reconciled.result.final_total,
                Some(format!(
                    "active code: {} (you save {})",
                    code,
                    self.formatter.format(reconciled.result.discount_amount)
                )),
            ),
            None => (Money::zero(), subtotal, None),
        };

        CartViewModel {
            items: cart
                .iter()
                .map(|item| ItemView::new(item, &self.formatter, &self.placeholder_image))
                .collect(),
            count: cart.count(),
            subtotal,
            discount,
            total,
            subtotal_display: self.formatter.format(subtotal),
            discount_display: self.formatter.format(discount),
            total_display: self.formatter.format(total),
            promo_message,
            promo_is_valid: reconciled.code.is_some(),
            active_code: reconciled.code,
            is_empty: cart.is_empty(),
        }
    }

    /// Formats an amount the way the rest of the page does.
    pub fn format_price(&self, amount: Money) -> String {
        self.formatter.format(amount)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn engine(&self) -> &PromoEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::PROMO_KEY;
    use crate::memory::MemoryStore;
    use panier_core::PromoRule;
    use std::io;

    /// Memory backend whose deletes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyDeletes(MemoryStore);

    impl KeyValueStore for ReadOnlyDeletes {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
            self.0.set(key, value)
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn controller() -> CartController<MemoryStore> {
        CartController::new(CartStore::new(MemoryStore::new()))
    }

    fn shoes() -> NewProduct {
        NewProduct::new("p1", "Shoes", Money::from_cents(10000)).with_image("shoes.jpg")
    }

    #[test]
    fn test_view_model_without_code() {
        let mut c = controller();
        c.add_item(&shoes()).unwrap();
        c.add_item(&NewProduct::new("p2", "Socks", Money::from_cents(999))).unwrap();

        let vm = c.view_model();
        assert_eq!(vm.items.len(), 2);
        assert_eq!(vm.count, 2);
        assert_eq!(vm.subtotal.cents(), 10999);
        assert_eq!(vm.total, vm.subtotal);
        assert!(vm.discount.is_zero());
        assert_eq!(vm.promo_message, None);
        assert!(!vm.promo_is_valid);
        assert_eq!(vm.items[0].image_url, "shoes.jpg");
        assert_eq!(vm.items[1].image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(vm.items[1].unit_price_display, "9,99 €");
    }

    #[test]
    fn test_apply_valid_code_stores_normalized() {
        let mut c = controller();
        c.add_item(&shoes()).unwrap();

        let outcome = c.apply_promo_code("  cca15 ").unwrap();
        assert!(outcome.result.is_valid);
        assert_eq!(
            outcome.display_message,
            "code applied: -15% (you save 15,00 €)"
        );
        assert_eq!(c.store().load_promo().as_deref(), Some("CCA15"));

        let vm = c.view_model();
        assert!(vm.promo_is_valid);
        assert_eq!(vm.active_code.as_deref(), Some("CCA15"));
        assert_eq!(vm.total_display, "85,00 €");
        assert_eq!(
            vm.promo_message.as_deref(),
            Some("active code: CCA15 (you save 15,00 €)")
        );
    }

    #[test]
    fn test_oversized_code_is_just_invalid() {
        let mut c = controller();
        c.add_item(&shoes()).unwrap();
        c.apply_promo_code("CCA15").unwrap();

        let outcome = c.apply_promo_code(&"X".repeat(100)).unwrap();
        assert!(!outcome.result.is_valid);
        assert_eq!(outcome.result.message, "invalid code");
        assert_eq!(c.store().load_promo(), None);
    }

    #[test]
    fn test_empty_code_clears_stored_code() {
        let mut c = controller();
        c.add_item(&shoes()).unwrap();
        c.apply_promo_code("CCA15").unwrap();

        let outcome = c.apply_promo_code("").unwrap();
        assert_eq!(outcome.result.message, "no code applied");
        assert!(!c.store().backend().contains_key(PROMO_KEY));
    }

    #[test]
    fn test_code_survives_cart_changes_while_valid() {
        let mut c = controller();
        c.add_item(&shoes()).unwrap();
        c.apply_promo_code("CCA15").unwrap();
        c.add_item(&shoes()).unwrap();

        let vm = c.view_model();
        assert!(vm.promo_is_valid);
        assert_eq!(vm.discount.cents(), 3000);
        assert_eq!(vm.total.cents(), 17000);
    }

    #[test]
    fn test_changed_rule_drops_old_code_on_view() {
        let mut backend = MemoryStore::new();
        backend.set(PROMO_KEY, "CCA15").unwrap();
        let mut c = CartController::new(CartStore::new(backend))
            .with_engine(PromoEngine::new(PromoRule::new("SUMMER", 1000)));
        c.add_item(&shoes()).unwrap();

        let vm = c.view_model();
        assert!(!vm.promo_is_valid);
        assert_eq!(vm.total.cents(), 10000);
        assert_eq!(c.store().load_promo(), None);
    }

    #[test]
    fn test_custom_formatter_and_placeholder() {
        let mut c = controller()
            .with_formatter(PriceFormatter::new('.', "EUR"))
            .with_placeholder_image("none.png");
        c.add_item(&NewProduct::new("p2", "Socks", Money::from_cents(999))).unwrap();

        let vm = c.view_model();
        assert_eq!(vm.total_display, "9.99 EUR");
        assert_eq!(vm.items[0].image_url, "none.png");
        assert_eq!(c.format_price(Money::from_cents(100)), "1.00 EUR");
    }

    #[test]
    fn test_view_model_survives_failed_stale_code_removal() {
        let mut backend = ReadOnlyDeletes::default();
        backend.set(PROMO_KEY, "CCA15").unwrap();
        let mut c = CartController::new(CartStore::new(backend));

        let vm = c.view_model();
        assert!(vm.is_empty);
        assert!(!vm.promo_is_valid);
        assert_eq!(vm.active_code, None);
        assert_eq!(vm.total_display, "0,00 €");
        // Still stored, so the next build tries again.
        assert_eq!(c.store().load_promo().as_deref(), Some("CCA15"));
    }

    #[test]
    fn test_rejected_code_reports_failed_removal() {
        let mut backend = ReadOnlyDeletes::default();
        backend
            .set(
                crate::kv::CART_KEY,
                r#"[{"id":"p1","name":"Shoes","unitPrice":10000,"quantity":1}]"#,
            )
            .unwrap();
        let mut c = CartController::new(CartStore::new(backend));

        assert!(c.apply_promo_code("WRONG").is_err());
    }
}
