//! Listing query state and URL derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter that marks a request as a free-text search
pub const SEARCH_PARAM: &str = "by_name";

/// Page sizes the listing UI offers
pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

/// Sort direction for the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination, sort and search state for the listing view.
///
/// Mutations go through the setter methods so the page-reset and
/// sort-toggle policies stay in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    pub sort_column: String,
    pub sort_order: SortOrder,
    /// Free-text name filter; empty input normalizes to `None`
    pub search: Option<String>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: PAGE_SIZES[0],
            sort_column: "name".to_string(),
            sort_order: SortOrder::Asc,
            search: None,
        }
    }

    /// Set the search text, resetting to the first page on an actual change
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        let normalized = if text.is_empty() { None } else { Some(text) };
        if normalized == self.search {
            return;
        }
        self.search = normalized;
        self.page = 1;
    }

    /// Set the current page, floored at 1
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Set the page size; zero is ignored. The current page is kept as-is.
    pub fn set_per_page(&mut self, per_page: u32) {
        if per_page > 0 {
            self.per_page = per_page;
        }
    }

    /// Sort by a column: repeated clicks toggle the direction, a new
    /// column starts ascending.
    pub fn sort_by(&mut self, column: &str) {
        if self.sort_column == column {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_column = column.to_string();
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Listing URL: pagination, sort, and the name filter when present
    pub fn list_url(&self, base: &str) -> String {
        let mut url = format!(
            "{base}?page={}&per_page={}&sort={}:{}",
            self.page, self.per_page, self.sort_column, self.sort_order
        );
        if let Some(term) = self.search_term() {
            url.push_str(&format!("&{SEARCH_PARAM}={term}"));
        }
        url
    }

    /// Metadata URL: only the name filter, no pagination or sort
    pub fn meta_url(&self, base: &str) -> String {
        match self.search_term() {
            Some(term) => format!("{base}/meta?{SEARCH_PARAM}={term}"),
            None => format!("{base}/meta"),
        }
    }

    /// Total page count for a known total row count
    pub fn page_count(&self, total: u64) -> u32 {
        if self.per_page == 0 {
            0
        } else {
            total.div_ceil(self.per_page as u64) as u32
        }
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}
