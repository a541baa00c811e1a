//! Browse session: category scope, paged loading, and stale-page discard.

use shopwindow_core::{CatalogPage, CategoryFilter, Product};
use tracing::debug;

use crate::accumulator::CatalogAccumulator;
use crate::cache::{PageCache, PageKey};
use crate::source::CatalogSource;
use crate::CatalogError;

/// A token for one requested page fetch.
///
/// Carries the session generation current at request time, so a result that
/// arrives after the category changed is recognized as stale and discarded
/// rather than ingested into the reset accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    key: PageKey,
}

impl PageRequest {
    /// The cache key this request resolves.
    #[must_use]
    pub const fn key(&self) -> &PageKey {
        &self.key
    }
}

/// Result of handing a fetched page back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The page was ingested; this many products were new.
    Appended(usize),
    /// The request predates a category switch; the page was discarded.
    Discarded,
}

/// Result of a [`BrowseSession::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and ingested; this many products were new.
    Loaded {
        /// Newly appended product count (0 when every item was a duplicate).
        appended: usize,
    },
    /// Everything the catalog reports for this scope is already accumulated;
    /// no request was issued.
    Exhausted,
    /// The category changed while the fetch was outstanding; the page was
    /// discarded on arrival.
    Discarded,
}

/// One user's progressive walk through the catalog.
///
/// Owns the accumulator, the page cache, the active category, and the page
/// size. Loads are serialized: `load_more` takes `&mut self`, so at most one
/// next-page fetch is outstanding at a time and pages are always requested at
/// `skip = accumulated len`. The generation token is checked on completion
/// anyway, which also covers the split request/complete flow used by
/// callers that fetch out-of-band.
pub struct BrowseSession<S> {
    cache: PageCache<S>,
    accumulator: CatalogAccumulator,
    category: CategoryFilter,
    page_size: u64,
    generation: u64,
}

impl<S: CatalogSource> BrowseSession<S> {
    /// Create a session over the given source, unscoped, with the given page
    /// size (clamped to at least 1).
    #[must_use]
    pub fn new(source: S, page_size: u64) -> Self {
        Self {
            cache: PageCache::new(source),
            accumulator: CatalogAccumulator::new(),
            category: CategoryFilter::All,
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    /// The active category scope.
    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// The page cache (shared with the snapshot surface if desired).
    #[must_use]
    pub const fn cache(&self) -> &PageCache<S> {
        &self.cache
    }

    /// The accumulated products, in first-seen order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.accumulator.products()
    }

    /// Last-known total for the active category.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.accumulator.total()
    }

    /// Whether a further `load_more` would issue a request.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.accumulator.has_more()
    }

    /// Switch the active category.
    ///
    /// A no-op when the category is unchanged. Otherwise the accumulator is
    /// reset (the remote total and offsets are scoped per category) and the
    /// generation is bumped so in-flight results for the old scope are
    /// discarded on arrival.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if category == self.category {
            return;
        }
        debug!(previous = %self.category, next = %category, "switching category, resetting accumulation");
        self.category = category;
        self.generation = self.generation.wrapping_add(1);
        self.accumulator.reset();
    }

    /// Build the request for the next page, at `skip = accumulated len`.
    ///
    /// Returns `None` when the last-known total says there is nothing left
    /// to fetch - `load_more` is then a no-op that issues no request.
    #[must_use]
    pub fn next_page_request(&self) -> Option<PageRequest> {
        if !self.accumulator.has_more() {
            return None;
        }
        Some(PageRequest {
            generation: self.generation,
            key: PageKey {
                limit: self.page_size,
                category: self.category.clone(),
                skip: self.accumulator.len() as u64,
            },
        })
    }

    /// Resolve a page request through the cache without touching session
    /// state. Pair with [`complete`](Self::complete).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] when the fetch fails; accumulated
    /// state is untouched.
    pub async fn fetch(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError> {
        self.cache.get_or_fetch(&request.key).await
    }

    /// Hand a fetched page back to the session.
    ///
    /// The page is ingested only if the session generation still matches the
    /// request's; a result for a superseded category is discarded.
    pub fn complete(&mut self, request: &PageRequest, page: CatalogPage) -> IngestOutcome {
        if request.generation != self.generation {
            debug!(
                category = %request.key.category,
                skip = request.key.skip,
                "discarding stale page from superseded category scope"
            );
            return IngestOutcome::Discarded;
        }
        IngestOutcome::Appended(self.accumulator.ingest(page))
    }

    /// Fetch and ingest the next page, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] when the fetch fails; accumulated
    /// state is untouched and the same page can be retried.
    pub async fn load_more(&mut self) -> Result<LoadOutcome, CatalogError> {
        let Some(request) = self.next_page_request() else {
            return Ok(LoadOutcome::Exhausted);
        };

        let page = self.cache.get_or_fetch(&request.key).await?;
        match self.complete(&request, page) {
            IngestOutcome::Appended(appended) => Ok(LoadOutcome::Loaded { appended }),
            IngestOutcome::Discarded => Ok(LoadOutcome::Discarded),
        }
    }
}
