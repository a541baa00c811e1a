//! Integration tests for the browse session, page cache, and accumulator
//! working together against an in-process catalog source.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_decimal::Decimal;
use shopwindow_catalog::{
    BrowseSession, CatalogSource, FetchError, IngestOutcome, LoadOutcome, PageCache, PageKey,
};
use shopwindow_core::{CatalogPage, CategoryFilter, Product, ProductId};

// ============================================================================
// Mock catalog source
// ============================================================================

fn product(id: i64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        description: String::new(),
        category: category.to_string(),
        price: Decimal::new(id * 100, 2),
        discount_percentage: 0.0,
        rating: 4.0,
        stock: 10,
        brand: None,
        tags: Vec::new(),
        thumbnail: None,
        images: Vec::new(),
    }
}

/// In-process catalog source backed by a fixed product universe.
///
/// Pages are sliced from the universe per category, like the real API.
/// Scripted pages (served verbatim, ignoring the requested key) and a
/// fail-first counter allow exercising dedup and retry paths.
#[derive(Clone)]
struct MockSource {
    inner: Arc<MockInner>,
}

struct MockInner {
    universe: Vec<Product>,
    calls: AtomicUsize,
    fail_remaining: AtomicUsize,
    scripted: Mutex<VecDeque<CatalogPage>>,
    delay: Option<Duration>,
}

impl MockSource {
    fn new(universe: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(MockInner {
                universe,
                calls: AtomicUsize::new(0),
                fail_remaining: AtomicUsize::new(0),
                scripted: Mutex::new(VecDeque::new()),
                delay: None,
            }),
        }
    }

    fn with_delay(universe: Vec<Product>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(MockInner {
                universe,
                calls: AtomicUsize::new(0),
                fail_remaining: AtomicUsize::new(0),
                scripted: Mutex::new(VecDeque::new()),
                delay: Some(delay),
            }),
        }
    }

    fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    fn fail_next(&self, count: usize) {
        self.inner.fail_remaining.store(count, Ordering::SeqCst);
    }

    fn script_page(&self, page: CatalogPage) {
        self.inner
            .scripted
            .lock()
            .expect("scripted pages lock")
            .push_back(page);
    }
}

impl CatalogSource for MockSource {
    async fn fetch_page(
        &self,
        limit: u64,
        category: &CategoryFilter,
        skip: u64,
    ) -> Result<CatalogPage, FetchError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.inner.delay {
            tokio::time::sleep(delay).await;
        }

        if self
            .inner
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(FetchError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }

        if let Some(page) = self
            .inner
            .scripted
            .lock()
            .expect("scripted pages lock")
            .pop_front()
        {
            return Ok(page);
        }

        let scoped: Vec<Product> = self
            .inner
            .universe
            .iter()
            .filter(|p| category.matches(&p.category))
            .cloned()
            .collect();
        let total = scoped.len() as u64;
        let products: Vec<Product> = scoped
            .into_iter()
            .skip(usize::try_from(skip).expect("skip fits usize"))
            .take(usize::try_from(limit).expect("limit fits usize"))
            .collect();

        Ok(CatalogPage {
            products,
            total,
            skip,
            limit,
        })
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        let mut names: Vec<String> = Vec::new();
        for p in &self.inner.universe {
            if !names.contains(&p.category) {
                names.push(p.category.clone());
            }
        }
        Ok(names)
    }
}

/// 50 unscoped products: ids 1-30 are "beauty", 31-50 are "groceries".
fn fifty_product_universe() -> Vec<Product> {
    (1..=50)
        .map(|id| product(id, if id <= 30 { "beauty" } else { "groceries" }))
        .collect()
}

fn session_ids(session: &BrowseSession<MockSource>) -> Vec<i64> {
    session.products().iter().map(|p| p.id.as_i64()).collect()
}

// ============================================================================
// Progressive loading
// ============================================================================

#[tokio::test]
async fn test_two_pages_accumulate_and_more_remain() {
    let source = MockSource::new(fifty_product_universe());
    let mut session = BrowseSession::new(source, 10);

    let outcome = session.load_more().await.expect("first page");
    assert_eq!(outcome, LoadOutcome::Loaded { appended: 10 });
    assert_eq!(session.total(), Some(50));

    // The next request goes out at skip = accumulated len.
    let request = session.next_page_request().expect("more pages exist");
    assert_eq!(request.key().skip, 10);

    let outcome = session.load_more().await.expect("second page");
    assert_eq!(outcome, LoadOutcome::Loaded { appended: 10 });

    assert_eq!(session.products().len(), 20);
    assert!(session.has_more());
}

#[tokio::test]
async fn test_load_more_after_total_reached_is_noop() {
    let source = MockSource::new(vec![product(1, "beauty"), product(2, "beauty")]);
    let mut session = BrowseSession::new(source.clone(), 10);

    session.load_more().await.expect("only page");
    assert!(!session.has_more());
    let calls_before = source.calls();

    let outcome = session.load_more().await.expect("no-op");
    assert_eq!(outcome, LoadOutcome::Exhausted);
    assert_eq!(source.calls(), calls_before);
}

#[tokio::test]
async fn test_overlapping_pages_deduplicate_in_first_seen_order() {
    let source = MockSource::new(Vec::new());
    source.script_page(CatalogPage {
        products: vec![product(1, "beauty"), product(2, "beauty"), product(3, "beauty")],
        total: 6,
        skip: 0,
        limit: 3,
    });
    // The backing catalog shifted: the second page re-serves ids 3 and 1.
    source.script_page(CatalogPage {
        products: vec![product(3, "beauty"), product(4, "beauty"), product(1, "beauty")],
        total: 6,
        skip: 3,
        limit: 3,
    });

    let mut session = BrowseSession::new(source, 3);
    session.load_more().await.expect("first page");
    let outcome = session.load_more().await.expect("second page");

    assert_eq!(outcome, LoadOutcome::Loaded { appended: 1 });
    assert_eq!(session_ids(&session), vec![1, 2, 3, 4]);
}

// ============================================================================
// Category switching
// ============================================================================

#[tokio::test]
async fn test_category_switch_resets_and_restarts_at_skip_zero() {
    let source = MockSource::new(fifty_product_universe());
    let mut session = BrowseSession::new(source, 10);

    session.load_more().await.expect("unscoped page");
    assert_eq!(session.products().len(), 10);

    session.set_category(CategoryFilter::parse("groceries"));
    assert!(session.products().is_empty());
    assert_eq!(session.total(), None);

    let request = session.next_page_request().expect("fresh scope");
    assert_eq!(request.key().skip, 0);
    assert_eq!(request.key().category, CategoryFilter::parse("groceries"));

    session.load_more().await.expect("groceries page");
    assert!(session.products().iter().all(|p| p.category == "groceries"));
}

#[tokio::test]
async fn test_setting_same_category_does_not_reset() {
    let source = MockSource::new(fifty_product_universe());
    let mut session = BrowseSession::new(source, 10);

    session.load_more().await.expect("page");
    session.set_category(CategoryFilter::All);

    assert_eq!(session.products().len(), 10);
}

#[tokio::test]
async fn test_in_flight_page_for_old_category_is_discarded_on_arrival() {
    let source = MockSource::new(fifty_product_universe());
    let mut session = BrowseSession::new(source, 10);

    // Fetch resolves for the unscoped catalog, but the user switches
    // category before the result is handed back to the session.
    let stale_request = session.next_page_request().expect("initial request");
    let stale_page = session.fetch(&stale_request).await.expect("unscoped page");

    session.set_category(CategoryFilter::parse("groceries"));
    session.load_more().await.expect("groceries page");

    let outcome = session.complete(&stale_request, stale_page);
    assert_eq!(outcome, IngestOutcome::Discarded);
    assert!(session.products().iter().all(|p| p.category == "groceries"));
    assert_eq!(session.products().len(), 10);
}

// ============================================================================
// Page cache behavior
// ============================================================================

#[tokio::test]
async fn test_concurrent_identical_keys_issue_one_fetch() {
    let source = MockSource::with_delay(fifty_product_universe(), Duration::from_millis(10));
    let cache = PageCache::new(source.clone());
    let key = PageKey {
        limit: 10,
        category: CategoryFilter::All,
        skip: 0,
    };

    let (a, b) = tokio::join!(cache.get_or_fetch(&key), cache.get_or_fetch(&key));
    assert_eq!(a.expect("coalesced fetch").products.len(), 10);
    assert_eq!(b.expect("coalesced fetch").products.len(), 10);
    assert_eq!(source.calls(), 1);

    // Revisiting the key later is served from cache.
    cache.get_or_fetch(&key).await.expect("cached page");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached_and_retry_refetches() {
    let source = MockSource::new(fifty_product_universe());
    source.fail_next(1);
    let cache = PageCache::new(source.clone());
    let key = PageKey {
        limit: 10,
        category: CategoryFilter::All,
        skip: 0,
    };

    assert!(cache.get_or_fetch(&key).await.is_err());
    assert_eq!(source.calls(), 1);

    let page = cache.get_or_fetch(&key).await.expect("retry succeeds");
    assert_eq!(page.products.len(), 10);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_fetch_failure_leaves_accumulation_untouched() {
    let source = MockSource::new(fifty_product_universe());
    let mut session = BrowseSession::new(source.clone(), 10);

    session.load_more().await.expect("first page");
    source.fail_next(1);

    assert!(session.load_more().await.is_err());
    assert_eq!(session.products().len(), 10);
    assert_eq!(session.total(), Some(50));

    // The failed key was not cached, so the retry goes back to the source
    // and the walk continues where it left off.
    let outcome = session.load_more().await.expect("retry succeeds");
    assert_eq!(outcome, LoadOutcome::Loaded { appended: 10 });
    assert_eq!(session.products().len(), 20);
}

// ============================================================================
// Full-catalog snapshot
// ============================================================================

#[tokio::test]
async fn test_full_catalog_snapshot_walks_every_page() {
    let source = MockSource::new(fifty_product_universe());

    let snapshot = shopwindow_catalog::fetch_full_catalog(&source, 20)
        .await
        .expect("snapshot");

    assert_eq!(snapshot.len(), 50);
    assert_eq!(source.calls(), 3);
    let ids: Vec<i64> = snapshot.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, (1..=50).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_categories_come_from_source() {
    let source = MockSource::new(fifty_product_universe());
    let names = source.fetch_categories().await.expect("categories");
    assert_eq!(names, vec!["beauty".to_string(), "groceries".to_string()]);
}
