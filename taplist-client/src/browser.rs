//! Brewery listing browser
//!
//! Owns the query state and the two fetch slots (list + meta) behind the
//! listing view. Setters mutate the query, re-derive both URLs and hand
//! them to the fetchers; each fetcher decides for itself whether its URL
//! actually changed. Consumers await [`BreweryBrowser::changed`] and take
//! a fresh [`ListingSnapshot`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::fetch::{FetchState, Fetcher};
use crate::query::{ListingQuery, SortOrder};
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{Brewery, BreweryRow, BreweryTable, ListingMeta};

/// Render-ready snapshot of the listing view
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    /// True while either channel is still loading
    pub loading: bool,
    /// First error across the channels, list first
    pub error: Option<FetchError>,
    pub total: u64,
    pub rows: Vec<BreweryRow>,
    pub page_count: u32,
    pub page: u32,
    pub per_page: u32,
    pub sort_column: String,
    pub sort_order: SortOrder,
}

/// Query state plus the two fetchers driving the brewery listing
pub struct BreweryBrowser {
    config: ClientConfig,
    query: ListingQuery,
    list: Fetcher<Vec<Brewery>>,
    meta: Fetcher<ListingMeta>,
    list_rx: watch::Receiver<FetchState<Vec<Brewery>>>,
    meta_rx: watch::Receiver<FetchState<ListingMeta>>,
}

impl BreweryBrowser {
    /// Open the default listing over the given transport.
    ///
    /// Both fetchers start their first cycle immediately; spawns onto the
    /// ambient Tokio runtime.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let query = ListingQuery::new();
        let list = Fetcher::new(
            transport.clone(),
            query.list_url(&config.base_url),
            config.fetch_options(None),
        );
        let meta = Fetcher::new(
            transport,
            query.meta_url(&config.base_url),
            config.fetch_options(None),
        );
        let list_rx = list.subscribe();
        let meta_rx = meta.subscribe();
        Self {
            config,
            query,
            list,
            meta,
            list_rx,
            meta_rx,
        }
    }

    /// Open the listing over the network transport built from `config`
    pub fn connect(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::new(config, transport))
    }

    /// Set the search text; an actual change resets to the first page
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.set_search(text);
        self.refresh();
    }

    /// Jump to a page (1-based)
    pub fn set_page(&mut self, page: u32) {
        self.query.set_page(page);
        self.refresh();
    }

    /// Change the page size; the current page is kept
    pub fn set_per_page(&mut self, per_page: u32) {
        self.query.set_per_page(per_page);
        self.refresh();
    }

    /// Sort by a column: repeated calls toggle, a new column starts ascending
    pub fn sort_by(&mut self, column: &str) {
        self.query.sort_by(column);
        self.refresh();
    }

    /// Current query state
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Latest state of the list channel
    pub fn list_state(&self) -> FetchState<Vec<Brewery>> {
        self.list_rx.borrow().clone()
    }

    /// Latest state of the meta channel
    pub fn meta_state(&self) -> FetchState<ListingMeta> {
        self.meta_rx.borrow().clone()
    }

    /// Wait until either channel publishes a new state
    pub async fn changed(&mut self) {
        tokio::select! {
            result = self.list_rx.changed() => {
                let _ = result;
            }
            result = self.meta_rx.changed() => {
                let _ = result;
            }
        }
    }

    /// Compose the current query and both channel states into a snapshot.
    ///
    /// `total` prefers the parsed meta total and falls back to the list
    /// length; rows only ever come from the current list data, so an
    /// errored or reset list renders empty rather than stale.
    pub fn snapshot(&self) -> ListingSnapshot {
        let list = self.list_rx.borrow().clone();
        let meta = self.meta_rx.borrow().clone();

        let meta_total = meta.data.as_ref().and_then(|m| m.total_count());
        let table = BreweryTable::project(list.data.as_deref().unwrap_or(&[]), meta_total);

        ListingSnapshot {
            loading: list.loading || meta.loading,
            error: list.error.or(meta.error),
            total: table.total,
            rows: table.rows,
            page_count: self.query.page_count(table.total),
            page: self.query.page,
            per_page: self.query.per_page,
            sort_column: self.query.sort_column.clone(),
            sort_order: self.query.sort_order,
        }
    }

    /// Re-derive both URLs from the current query
    fn refresh(&self) {
        self.list.set_url(self.query.list_url(&self.config.base_url));
        self.meta.set_url(self.query.meta_url(&self.config.base_url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RouterTransport;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Counters {
        list: Arc<AtomicU32>,
        meta: Arc<AtomicU32>,
    }

    fn brewery(name: &str) -> Brewery {
        Brewery {
            name: name.to_string(),
            city: "Portland".to_string(),
            state_province: "Oregon".to_string(),
            state: "Oregon".to_string(),
            country: "United States".to_string(),
            postal_code: "97209".to_string(),
            street: None,
            address_1: Some("1313 NW Marshall St".to_string()),
            phone: None,
        }
    }

    fn fixture_router(counters: Counters, meta_ok: bool) -> Router {
        let list = {
            let counters = counters.clone();
            move || {
                counters.list.fetch_add(1, Ordering::SeqCst);
                async move { Json(vec![brewery("10 Barrel"), brewery("Breakside"), brewery("Deschutes")]) }
            }
        };
        let meta = move || {
            counters.meta.fetch_add(1, Ordering::SeqCst);
            async move {
                if meta_ok {
                    Ok(Json(json!({"total": "47", "page": "1", "per_page": "50"})))
                } else {
                    Err((
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(json!({"message": "meta offline"})),
                    ))
                }
            }
        };
        Router::new()
            .route("/v1/breweries", get(list))
            .route("/v1/breweries/meta", get(meta))
    }

    fn config() -> ClientConfig {
        ClientConfig::new("http://taplist.local/v1/breweries")
            .with_debounce(Duration::from_millis(100))
    }

    fn browser(counters: Counters, meta_ok: bool) -> BreweryBrowser {
        let transport = Arc::new(RouterTransport::new(fixture_router(counters, meta_ok)));
        BreweryBrowser::new(config(), transport)
    }

    async fn settle(browser: &mut BreweryBrowser) -> ListingSnapshot {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = browser.snapshot();
                if !snapshot.loading {
                    return snapshot;
                }
                browser.changed().await;
            }
        })
        .await
        .expect("listing never settled")
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_is_loading_and_empty() {
        let browser = browser(Counters::default(), true);
        let snapshot = browser.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.page_count, 0);
        assert!(snapshot.rows.is_empty());
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_snapshot_combines_list_and_meta() {
        let mut browser = browser(Counters::default(), true);
        let snapshot = settle(&mut browser).await;

        assert_eq!(snapshot.total, 47);
        assert_eq!(snapshot.rows.len(), 3);
        // 47 rows at the default page size of 5
        assert_eq!(snapshot.page_count, 10);
        assert_eq!(snapshot.rows[0].name, "10 Barrel");
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_meta_failure_falls_back_to_list_length() {
        let mut browser = browser(Counters::default(), false);
        let snapshot = settle(&mut browser).await;

        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.page_count, 1);
        assert_eq!(snapshot.rows.len(), 3);
        // The fallback does not hide the failing channel
        assert_eq!(
            snapshot.error,
            Some(FetchError::Api(json!({"message": "meta offline"})))
        );
        assert!(browser.meta_state().error.is_some());
        assert!(browser.list_state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparsable_meta_total_falls_back_to_list_length() {
        let router = Router::new()
            .route(
                "/v1/breweries",
                get(|| async {
                    Json(vec![brewery("10 Barrel"), brewery("Breakside"), brewery("Deschutes")])
                }),
            )
            .route(
                "/v1/breweries/meta",
                get(|| async { Json(json!({"total": "lots", "page": "1", "per_page": "50"})) }),
            );
        let mut browser = BreweryBrowser::new(config(), Arc::new(RouterTransport::new(router)));
        let snapshot = settle(&mut browser).await;

        // The meta channel settled fine; only the reported total is unusable
        assert_eq!(snapshot.error, None);
        assert!(browser.meta_state().data.is_some());
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.page_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_change_does_not_refetch_meta() {
        let counters = Counters::default();
        let mut browser = browser(counters.clone(), true);
        settle(&mut browser).await;
        assert_eq!(counters.meta.load(Ordering::SeqCst), 1);

        browser.set_page(2);
        let snapshot = settle(&mut browser).await;

        assert_eq!(snapshot.page, 2);
        assert_eq!(counters.list.load(Ordering::SeqCst), 2);
        assert_eq!(counters.meta.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_change_refetches_list_immediately() {
        let counters = Counters::default();
        let mut browser = browser(counters.clone(), true);
        settle(&mut browser).await;

        browser.sort_by("city");
        assert!(browser.snapshot().loading);
        let snapshot = settle(&mut browser).await;

        assert_eq!(snapshot.sort_column, "city");
        assert_eq!(snapshot.sort_order, SortOrder::Asc);
        assert_eq!(counters.list.load(Ordering::SeqCst), 2);
        assert_eq!(counters.meta.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_resets_page_and_debounces() {
        let counters = Counters::default();
        let mut browser = browser(counters.clone(), true);
        settle(&mut browser).await;
        browser.set_page(3);
        settle(&mut browser).await;
        let list_hits = counters.list.load(Ordering::SeqCst);

        browser.set_search("dog");
        browser.set_search("dogfish");
        assert_eq!(browser.query().page, 1);
        assert_eq!(browser.query().search.as_deref(), Some("dogfish"));

        // Inside the quiet window nothing has been issued yet
        assert_eq!(counters.list.load(Ordering::SeqCst), list_hits);
        let snapshot = settle(&mut browser).await;
        assert!(!snapshot.loading);
        assert_eq!(counters.list.load(Ordering::SeqCst), list_hits + 1);
        assert_eq!(counters.meta.load(Ordering::SeqCst), 2);
    }
}
