//! The cart store: single source of truth for cart membership.

use std::collections::HashSet;

use shopwindow_core::{CartEntry, ProductId};
use tracing::debug;

use crate::storage::{CartStorage, StorageError};

/// The persisted set of selected products, with a quantity per id.
///
/// Entry order is insertion order; ids are unique. Every surface that shows
/// cart state reads this store, and it is the sole writer of durable state.
/// Constructed once per client session and passed by handle to consumers -
/// there is no hidden global.
///
/// Mutations save to storage first and reflect in memory only on success, so
/// the in-memory view never gets ahead of what was actually persisted.
pub struct CartStore<P> {
    storage: P,
    entries: Vec<CartEntry>,
}

impl<P: CartStorage> CartStore<P> {
    /// Open the cart, loading persisted state.
    ///
    /// Loaded entries are defensively de-duplicated (first occurrence wins)
    /// and quantities clamped to at least 1, so a hand-edited or
    /// older-format document cannot violate the store's invariants.
    pub fn open(storage: P) -> Self {
        let mut seen = HashSet::new();
        let entries: Vec<CartEntry> = storage
            .load()
            .into_iter()
            .filter(|entry| seen.insert(entry.id))
            .map(|entry| CartEntry::new(entry.id, entry.quantity))
            .collect();

        debug!(len = entries.len(), "opened cart store");
        Self { storage, entries }
    }

    /// Add a product with quantity 1.
    ///
    /// Adding a present id is a no-op: returns `Ok(false)` without touching
    /// storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new state could not be persisted; the
    /// in-memory cart is left unchanged.
    pub fn add(&mut self, id: ProductId) -> Result<bool, StorageError> {
        if self.contains(id) {
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.push(CartEntry::new(id, 1));
        self.commit(next)?;
        Ok(true)
    }

    /// Remove a product.
    ///
    /// Removing an absent id is a no-op: returns `Ok(false)` without
    /// touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new state could not be persisted; the
    /// in-memory cart is left unchanged.
    pub fn remove(&mut self, id: ProductId) -> Result<bool, StorageError> {
        if !self.contains(id) {
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.retain(|entry| entry.id != id);
        self.commit(next)?;
        Ok(true)
    }

    /// Set the quantity for a present product. Quantities below 1 are
    /// clamped to 1. Returns `Ok(false)` when the id is absent or the
    /// quantity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new state could not be persisted; the
    /// in-memory cart is left unchanged.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Result<bool, StorageError> {
        let quantity = quantity.max(1);
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };
        if self.entries.get(index).is_some_and(|e| e.quantity == quantity) {
            return Ok(false);
        }

        let mut next = self.entries.clone();
        if let Some(entry) = next.get_mut(index) {
            entry.quantity = quantity;
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// The entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// The product ids, in insertion order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn commit(&mut self, next: Vec<CartEntry>) -> Result<(), StorageError> {
        self.storage.save(&next)?;
        self.entries = next;
        Ok(())
    }
}
