//! Taplist Client - fetch orchestration for a paginated brewery listing
//!
//! Drives a paginated, sortable, searchable listing backed by the Open
//! Brewery DB API: derives request URLs from the query state, debounces
//! search-as-you-type requests, discards stale responses, and exposes a
//! `{loading, error, data}` view per request slot plus a combined snapshot
//! for rendering.

pub mod browser;
pub mod config;
pub mod error;
pub mod fetch;
pub mod query;
pub mod transport;
pub mod types;

pub use browser::{BreweryBrowser, ListingSnapshot};
pub use config::{ClientConfig, OPEN_BREWERY_DB_URL};
pub use error::{FetchError, FetchResult};
pub use fetch::{Debouncer, FetchOptions, FetchState, Fetcher};
pub use query::{ListingQuery, PAGE_SIZES, SEARCH_PARAM, SortOrder};
pub use transport::{HttpTransport, Transport, TransportError, WireResponse};
#[cfg(feature = "in-process")]
pub use transport::RouterTransport;
pub use types::{Brewery, BreweryRow, BreweryTable, COLUMNS, Column, ColumnAlign, ListingMeta};
