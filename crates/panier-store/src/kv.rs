//! Key-value storage abstraction.
//!
//! The cart never touches a storage medium directly; it talks to a
//! [`KeyValueStore`] handed to it at construction. Values are strings, the
//! same shape a browser's local storage offers.

use crate::error::StoreResult;

/// Key holding the serialized cart (a JSON array of line items).
pub const CART_KEY: &str = "cart-data";

/// Key holding the active promo code, normalized.
pub const PROMO_KEY: &str = "promo-code";

/// String key-value storage.
///
/// Reads take `&self`, writes `&mut self`: the store is owned by exactly
/// one cart and driven by one event at a time.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if it was never set or was
    /// removed.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
