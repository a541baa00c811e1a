//! Shopwindow Catalog - client-side catalog state engine.
//!
//! # Architecture
//!
//! - [`source`] - the remote catalog capability: a [`CatalogSource`] trait
//!   plus the `reqwest`-backed [`HttpCatalogSource`]
//! - [`cache`] - per-key page cache over `moka` that coalesces concurrent
//!   fetches for identical `(limit, category, skip)` keys
//! - [`accumulator`] - the growing, deduplicated product list
//! - [`session`] - [`BrowseSession`]: ties cache + accumulator together,
//!   owns the active category and the stale-page generation counter
//! - [`pipeline`] - pure filter/sort over the accumulated products
//! - [`snapshot`] - full-catalog walk used by the cart surface
//!
//! # Example
//!
//! ```rust,ignore
//! use shopwindow_catalog::{BrowseSession, HttpCatalogSource, pipeline, pipeline::ProductFilters};
//!
//! let source = HttpCatalogSource::new("https://dummyjson.com".parse()?);
//! let mut session = BrowseSession::new(source, 15);
//! session.load_more().await?;
//! let view = pipeline::apply(session.products(), &ProductFilters::default());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accumulator;
pub mod cache;
pub mod pipeline;
pub mod session;
pub mod snapshot;
pub mod source;

pub use accumulator::CatalogAccumulator;
pub use cache::{PageCache, PageKey};
pub use session::{BrowseSession, IngestOutcome, LoadOutcome, PageRequest};
pub use snapshot::fetch_full_catalog;
pub use source::{CatalogSource, FetchError, HttpCatalogSource};

use std::sync::Arc;

use thiserror::Error;

/// Errors surfaced by catalog operations.
///
/// A failed fetch is local to the requesting operation: it never corrupts
/// accumulated state and a retry of the same key re-fetches.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The underlying network fetch or response decode failed.
    ///
    /// The error is `Arc`-wrapped because the page cache shares one failure
    /// among every caller coalesced onto the same in-flight fetch.
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] Arc<FetchError>),
}

impl CatalogError {
    pub(crate) fn fetch(err: FetchError) -> Self {
        Self::Fetch(Arc::new(err))
    }
}
