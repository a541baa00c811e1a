//! Remote catalog capability.
//!
//! The engine never talks to the network directly; it goes through the
//! [`CatalogSource`] trait so that sessions and caches can be driven by an
//! in-process fake in tests. [`HttpCatalogSource`] is the production
//! implementation over `reqwest`.

use shopwindow_core::{CatalogPage, CategoryFilter};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Errors from a single catalog fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Response body did not decode as the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be constructed.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Async capability for fetching catalog data.
///
/// `fetch_page` returns one bounded page; `fetch_categories` returns the flat
/// list of category names. A category-list failure must never block product
/// browsing - callers treat the two fetches as independent.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch one page of products for the given scope.
    async fn fetch_page(
        &self,
        limit: u64,
        category: &CategoryFilter,
        skip: u64,
    ) -> Result<CatalogPage, FetchError>;

    /// Fetch the flat list of category names.
    async fn fetch_categories(&self) -> Result<Vec<String>, FetchError>;
}

/// `reqwest`-backed catalog source.
///
/// Endpoints:
/// - `GET <base>/products?limit={n}&skip={k}` (unscoped)
/// - `GET <base>/products/category/{name}?limit={n}&skip={k}`
/// - `GET <base>/products/category-list`
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogSource {
    /// Create a source against the given API base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn products_url(&self, category: &CategoryFilter) -> Result<Url, FetchError> {
        let path = match category {
            CategoryFilter::All => "products".to_string(),
            CategoryFilter::Named(name) => format!("products/category/{name}"),
        };
        Ok(self.base_url.join(&path)?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Decode from text so a malformed body is a Parse error with the
        // original serde diagnostics, not an opaque reqwest error.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(category = %category))]
    async fn fetch_page(
        &self,
        limit: u64,
        category: &CategoryFilter,
        skip: u64,
    ) -> Result<CatalogPage, FetchError> {
        let mut url = self.products_url(category)?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());

        debug!(%url, "fetching catalog page");
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        let url = self.base_url.join("products/category-list")?;

        debug!(%url, "fetching category list");
        self.get_json(url).await
    }
}
