//! Cart entry and derived line-item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// One selected product in the cart: an identifier plus a quantity.
///
/// The cart is a mapping from product id to quantity; id uniqueness is the
/// core invariant and is enforced by the cart store, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product identifier (may or may not still exist in the catalog).
    pub id: ProductId,
    /// Selected quantity, always >= 1.
    pub quantity: u32,
}

impl CartEntry {
    /// Create an entry, clamping the quantity to at least 1.
    #[must_use]
    pub fn new(id: ProductId, quantity: u32) -> Self {
        Self {
            id,
            quantity: quantity.max(1),
        }
    }
}

/// A cart entry resolved against catalog data into a priced, displayable row.
///
/// Derived, never stored: recomputed whenever either the cart or the catalog
/// snapshot changes, so the subtotal can never go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// The cart entry's product id.
    pub product_id: ProductId,
    /// Product title, or the unknown-product placeholder.
    pub title: String,
    /// Unit price; zero for unknown products.
    pub unit_price: Decimal,
    /// Quantity as stored in the cart.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub subtotal: Decimal,
    /// Thumbnail URL, when the product resolved.
    pub thumbnail: Option<String>,
}

/// All cart lines plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// One line per cart entry, in cart order.
    pub lines: Vec<CartLine>,
    /// Sum of all line subtotals.
    pub total: Decimal,
}
