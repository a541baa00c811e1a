//! Page cache keyed by `(limit, category, skip)`.
//!
//! Backed by `moka`'s future cache. `try_get_with_by_ref` gives exactly the
//! semantics the engine needs: concurrent callers of the same key coalesce
//! onto one outstanding fetch, completed pages are served from cache on
//! revisit, and a failed fetch does not populate the cache, so a retry of the
//! same key re-fetches.

use moka::future::Cache;
use shopwindow_core::{CatalogPage, CategoryFilter};
use tracing::{debug, instrument};

use crate::source::CatalogSource;
use crate::CatalogError;

/// Maximum number of cached pages. Revisited pages well past this bound are
/// re-fetched, which is correct, just slower.
const MAX_CACHED_PAGES: u64 = 256;

/// Cache key for one catalog page fetch.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct PageKey {
    /// Page size.
    pub limit: u64,
    /// Category scope.
    pub category: CategoryFilter,
    /// Offset into the scoped catalog.
    pub skip: u64,
}

/// Memoizing fetch layer over a [`CatalogSource`].
#[derive(Clone)]
pub struct PageCache<S> {
    source: S,
    pages: Cache<PageKey, CatalogPage>,
}

impl<S: CatalogSource> PageCache<S> {
    /// Create a cache over the given source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            pages: Cache::builder().max_capacity(MAX_CACHED_PAGES).build(),
        }
    }

    /// The underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Return the page for `key`, fetching it at most once per cache miss.
    ///
    /// If a fetch for the same key is already in flight, this awaits the
    /// outstanding result instead of issuing a duplicate request; every
    /// coalesced caller then shares the same success or failure.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] when the underlying fetch fails. The
    /// failure is not cached.
    #[instrument(
        skip(self, key),
        fields(limit = key.limit, skip = key.skip, category = %key.category)
    )]
    pub async fn get_or_fetch(&self, key: &PageKey) -> Result<CatalogPage, CatalogError> {
        self.pages
            .try_get_with_by_ref(key, async {
                debug!("cache miss, fetching page from source");
                self.source
                    .fetch_page(key.limit, &key.category, key.skip)
                    .await
            })
            .await
            .map_err(CatalogError::Fetch)
    }
}
