//! Fetch orchestration
//!
//! A [`Fetcher`] owns one URL-keyed request slot and publishes its
//! [`FetchState`] through a watch channel; the [`Debouncer`] is the timing
//! primitive behind search-as-you-type requests.

mod debounce;
mod fetcher;

pub use debounce::Debouncer;
pub use fetcher::Fetcher;

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::FetchError;

/// Reactive view of one request slot.
///
/// Exactly one of `data` / `error` is populated once a cycle settles;
/// a new cycle resets the state to its pending shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// True from cycle start until the cycle settles
    pub loading: bool,
    pub error: Option<FetchError>,
    pub data: Option<T>,
}

impl<T> FetchState<T> {
    /// State of a freshly started cycle
    pub fn pending() -> Self {
        Self {
            loading: true,
            error: None,
            data: None,
        }
    }

    /// True once the cycle has settled with either data or an error
    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::pending();
    }

    pub(crate) fn settle_ok(&mut self, data: T) {
        self.loading = false;
        self.error = None;
        self.data = Some(data);
    }

    pub(crate) fn settle_err(&mut self, error: FetchError) {
        self.loading = false;
        self.data = None;
        self.error = Some(error);
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::pending()
    }
}

/// Per-fetcher options produced by
/// [`ClientConfig::fetch_options`](crate::config::ClientConfig::fetch_options)
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Fully merged request headers
    pub headers: BTreeMap<String, String>,
    /// Quiet window applied to search-bearing URLs
    pub debounce: Duration,
}
