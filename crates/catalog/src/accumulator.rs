//! The growing, deduplicated product list.

use std::collections::HashSet;

use shopwindow_core::{CatalogPage, Product, ProductId};
use tracing::debug;

/// Accumulates successive page fetches into a deduplicated, order-stable
/// product sequence.
///
/// Invariants:
/// - no duplicate product ids; first-seen order wins, later duplicates are
///   dropped, never reordered
/// - the sequence only grows, except through an explicit [`reset`]
/// - `total` is last-known, taken from the most recently ingested page
///
/// [`reset`]: CatalogAccumulator::reset
#[derive(Debug, Default, Clone)]
pub struct CatalogAccumulator {
    products: Vec<Product>,
    seen: HashSet<ProductId>,
    total: Option<u64>,
}

impl CatalogAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fetched page in, appending products whose id has not been
    /// seen yet. Returns the number of products actually appended.
    pub fn ingest(&mut self, page: CatalogPage) -> usize {
        let before = self.products.len();
        for product in page.products {
            if self.seen.insert(product.id) {
                self.products.push(product);
            }
        }
        self.total = Some(page.total);

        let appended = self.products.len() - before;
        debug!(
            appended,
            len = self.products.len(),
            total = page.total,
            "ingested catalog page"
        );
        appended
    }

    /// Clear all accumulated products and the known total.
    ///
    /// Invoked exactly when the active category changes: a different category
    /// invalidates previously accumulated offsets, and the next fetch must
    /// start at `skip = 0`.
    pub fn reset(&mut self) {
        self.products.clear();
        self.seen.clear();
        self.total = None;
    }

    /// The accumulated products, in first-seen order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consume the accumulator, yielding the accumulated products.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// Number of accumulated products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Last-known total for the active scope, if any page has been ingested.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether further pages exist: `len < total`, or the total is unknown
    /// because nothing has been fetched yet.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.total
            .is_none_or(|total| (self.products.len() as u64) < total)
    }
}
