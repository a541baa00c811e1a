//! Cart management commands.

use shopwindow_cart::{aggregator, CartStore, JsonFileStorage, StorageError};
use shopwindow_catalog::{CatalogError, HttpCatalogSource};
use shopwindow_core::ProductId;
use thiserror::Error;

use crate::config::CliConfig;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Durable cart write failed; the mutation did not take effect.
    #[error("could not save cart: {0}")]
    Storage(#[from] StorageError),

    /// Full-catalog snapshot fetch failed.
    #[error("could not load catalog for cart: {0}")]
    Catalog(#[from] CatalogError),
}

fn open_store(config: &CliConfig) -> CartStore<JsonFileStorage> {
    CartStore::open(JsonFileStorage::new(&config.cart_path))
}

/// Add a product id to the cart.
///
/// # Errors
///
/// Returns [`CartError::Storage`] when the new state could not be persisted.
pub fn add(config: &CliConfig, id: i64) -> Result<(), CartError> {
    let id = ProductId::new(id);
    let mut store = open_store(config);

    if store.add(id)? {
        println!("Added product {id} to cart");
    } else {
        println!("Product {id} is already in the cart");
    }
    Ok(())
}

/// Remove a product id from the cart.
///
/// # Errors
///
/// Returns [`CartError::Storage`] when the new state could not be persisted.
pub fn remove(config: &CliConfig, id: i64) -> Result<(), CartError> {
    let id = ProductId::new(id);
    let mut store = open_store(config);

    if store.remove(id)? {
        println!("Removed product {id} from cart");
    } else {
        println!("Product {id} is not in the cart");
    }
    Ok(())
}

/// Set the quantity for a product already in the cart.
///
/// # Errors
///
/// Returns [`CartError::Storage`] when the new state could not be persisted.
pub fn set_quantity(config: &CliConfig, id: i64, quantity: u32) -> Result<(), CartError> {
    let id = ProductId::new(id);
    let mut store = open_store(config);

    if store.set_quantity(id, quantity)? {
        println!("Set quantity for product {id}");
    } else if store.contains(id) {
        println!("Quantity for product {id} is unchanged");
    } else {
        println!("Product {id} is not in the cart");
    }
    Ok(())
}

/// Join the cart against a full catalog snapshot and print priced lines.
///
/// Cart ids may come from any category or page, so this fetches the whole
/// unscoped catalog rather than any accumulated subset. Ids with no matching
/// product show as placeholder lines, not errors.
///
/// # Errors
///
/// Returns [`CartError::Catalog`] when the snapshot fetch fails.
pub async fn show(config: &CliConfig) -> Result<(), CartError> {
    let store = open_store(config);
    if store.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    let source = HttpCatalogSource::new(config.api_base_url.clone());
    let catalog = shopwindow_catalog::fetch_full_catalog(&source, 100).await?;

    let summary = aggregator::build_lines(store.entries(), &catalog);
    for line in &summary.lines {
        println!(
            "{:>6}  {:<48} {:>8} x{:<3} = {:>9}",
            line.product_id.as_i64(),
            line.title,
            line.unit_price,
            line.quantity,
            line.subtotal
        );
    }
    println!("Total: {}", summary.total);
    Ok(())
}
