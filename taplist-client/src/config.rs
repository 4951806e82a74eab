//! Client configuration

use std::collections::BTreeMap;
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Public Open Brewery DB listing endpoint
pub const OPEN_BREWERY_DB_URL: &str = "https://api.openbrewerydb.org/v1/breweries";

const DEFAULT_DEBOUNCE_MS: u64 = 2000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for the listing API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the listing collection (e.g. "https://api.openbrewerydb.org/v1/breweries")
    pub base_url: String,

    /// Quiet period applied to search-bearing requests
    pub debounce: Duration,

    /// Request timeout for the network transport
    pub timeout: Duration,

    /// Default request headers, merged under per-fetcher overrides
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a new client configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            base_url: base_url.into(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers,
        }
    }

    /// Set the search debounce window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set or replace a default request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge the default headers under caller-supplied overrides.
    ///
    /// Caller keys take precedence over defaults with the same name.
    pub fn merged_headers(
        &self,
        overrides: Option<&BTreeMap<String, String>>,
    ) -> BTreeMap<String, String> {
        let mut merged = self.headers.clone();
        if let Some(overrides) = overrides {
            for (name, value) in overrides {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// Produce the per-fetcher options for this configuration
    pub fn fetch_options(&self, overrides: Option<&BTreeMap<String, String>>) -> FetchOptions {
        FetchOptions {
            headers: self.merged_headers(overrides),
            debounce: self.debounce,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(OPEN_BREWERY_DB_URL)
    }
}
