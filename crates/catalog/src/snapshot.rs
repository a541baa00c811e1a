//! Full-catalog snapshot walk.
//!
//! The cart surface joins cart ids against the whole catalog - cart items may
//! originate from any category or page, not just the currently accumulated
//! subset - so it needs an unscoped, complete product list.

use shopwindow_core::{CategoryFilter, Product};
use tracing::instrument;

use crate::accumulator::CatalogAccumulator;
use crate::source::CatalogSource;
use crate::CatalogError;

/// Fetch the entire unscoped catalog, page by page, until the last-known
/// total is reached. Deduplicates through a [`CatalogAccumulator`], so a
/// backing catalog that shifts under the walk cannot produce duplicate ids.
///
/// # Errors
///
/// Returns [`CatalogError::Fetch`] if any page fetch fails; no partial
/// snapshot is returned.
#[instrument(skip(source))]
pub async fn fetch_full_catalog<S: CatalogSource>(
    source: &S,
    page_size: u64,
) -> Result<Vec<Product>, CatalogError> {
    let page_size = page_size.max(1);
    let mut accumulator = CatalogAccumulator::new();

    while accumulator.has_more() {
        let skip = accumulator.len() as u64;
        let page = source
            .fetch_page(page_size, &CategoryFilter::All, skip)
            .await
            .map_err(CatalogError::fetch)?;

        let appended = accumulator.ingest(page);
        if appended == 0 {
            // A source that repeats items or reports an unreachable total
            // would otherwise loop forever.
            break;
        }
    }

    Ok(accumulator.into_products())
}
