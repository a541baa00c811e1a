//! Product browsing command: progressive load, filter, sort, display.

use shopwindow_cart::{CartStore, JsonFileStorage};
use shopwindow_catalog::pipeline::{self, ProductFilters};
use shopwindow_catalog::{BrowseSession, CatalogError, HttpCatalogSource, LoadOutcome};
use shopwindow_core::{CategoryFilter, ParseSortOrderError, SortOrder};
use thiserror::Error;

use crate::config::CliConfig;

/// Errors that can occur while browsing products.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Catalog fetch failed.
    #[error("could not load products: {0}")]
    Catalog(#[from] CatalogError),

    /// Sort order argument did not parse.
    #[error(transparent)]
    SortOrder(#[from] ParseSortOrderError),
}

/// Load up to `pages` pages for the given category, apply the filter/sort
/// pipeline, and print the resulting view. Items in the persisted cart are
/// marked with `*`.
///
/// # Errors
///
/// Returns [`BrowseError`] when an argument does not parse or a page fetch
/// fails. A fetch failure surfaces as "could not load"; nothing is retried
/// automatically.
pub async fn browse(
    config: &CliConfig,
    category: &str,
    search: &str,
    min_rating: f64,
    sort: &str,
    pages: u32,
) -> Result<(), BrowseError> {
    let sort: SortOrder = sort.parse()?;
    let category = CategoryFilter::parse(category);

    let source = HttpCatalogSource::new(config.api_base_url.clone());
    let mut session = BrowseSession::new(source, config.page_size);
    session.set_category(category.clone());

    for _ in 0..pages {
        match session.load_more().await? {
            LoadOutcome::Loaded { .. } | LoadOutcome::Discarded => {}
            LoadOutcome::Exhausted => break,
        }
    }

    let filters = ProductFilters {
        search: search.to_string(),
        category,
        min_rating,
        sort,
    };
    let view = pipeline::apply(session.products(), &filters);

    // Cart state is read-only here; a failed read just shows no markers.
    let cart = CartStore::open(JsonFileStorage::new(&config.cart_path));

    if view.is_empty() {
        println!("No products found");
    } else {
        for product in &view {
            let marker = if cart.contains(product.id) { "*" } else { " " };
            println!(
                "{marker} {:>6}  {:<48} {:>8}  {:.2}",
                product.id.as_i64(),
                product.title,
                product.price,
                product.rating
            );
        }
    }

    let loaded = session.products().len();
    match session.total() {
        Some(total) if session.has_more() => {
            println!("-- {loaded} of {total} loaded; run with --pages to load more");
        }
        Some(total) => println!("-- all {total} loaded"),
        None => {}
    }
    Ok(())
}
