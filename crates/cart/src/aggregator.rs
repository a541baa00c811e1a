//! Join cart entries against a catalog snapshot into priced lines.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shopwindow_core::{CartEntry, CartLine, CartSummary, Product, ProductId};

/// Title shown for a cart id with no matching catalog product.
///
/// The remote catalog may have removed (or never contained) an id the cart
/// still holds; that is a placeholder line, never an error.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown Product";

/// Build one line per cart entry, in cart order, plus the grand total.
///
/// The total is recomputed in full on every call - there is no incremental
/// or cached total to drift from stale arithmetic.
#[must_use]
pub fn build_lines(entries: &[CartEntry], catalog: &[Product]) -> CartSummary {
    let mut by_id: HashMap<ProductId, &Product> = HashMap::with_capacity(catalog.len());
    for product in catalog {
        by_id.entry(product.id).or_insert(product);
    }

    let mut lines = Vec::with_capacity(entries.len());
    let mut total = Decimal::ZERO;

    for entry in entries {
        let line = match by_id.get(&entry.id) {
            Some(product) => CartLine {
                product_id: entry.id,
                title: product.title.clone(),
                unit_price: product.price,
                quantity: entry.quantity,
                subtotal: product.price * Decimal::from(entry.quantity),
                thumbnail: product.thumbnail.clone(),
            },
            None => CartLine {
                product_id: entry.id,
                title: UNKNOWN_PRODUCT_TITLE.to_string(),
                unit_price: Decimal::ZERO,
                quantity: entry.quantity,
                subtotal: Decimal::ZERO,
                thumbnail: None,
            },
        };
        total += line.subtotal;
        lines.push(line);
    }

    CartSummary { lines, total }
}
