//! Category list command.

use shopwindow_catalog::{CatalogSource, FetchError, HttpCatalogSource};

use crate::config::CliConfig;

/// Fetch and print the category names, one per line.
///
/// # Errors
///
/// Returns [`FetchError`] when the category-list fetch fails. This never
/// affects product browsing - the two fetches are independent.
pub async fn list(config: &CliConfig) -> Result<(), FetchError> {
    let source = HttpCatalogSource::new(config.api_base_url.clone());
    let names = source.fetch_categories().await?;

    println!("all");
    for name in names {
        println!("{name}");
    }
    Ok(())
}
