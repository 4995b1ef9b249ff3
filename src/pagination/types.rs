//! Pagination types
//!
//! The page envelope returned by the API, the batches handed to consumers,
//! and the per-stream fetch state.

use crate::http::Auth;
use crate::types::OptionStringExt;
use serde::Deserialize;
use url::Url;

/// Query parameter carrying the continuation token
pub const CURSOR_PARAM: &str = "cursor";

/// Cursor page envelope as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Token for the next page; absent or null on the last page
    #[serde(default)]
    pub next_page_cursor: Option<String>,
}

/// One batch of items, delivered as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based position of this page within its stream
    pub number: u32,
    /// Items in arrival order
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(number: u32, items: Vec<T>) -> Self {
        Self { number, items }
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the items out of the page
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Describes a paginated resource to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Endpoint URL, including any fixed query parameters
    pub url: Url,
    /// Session cookie policy for each page request
    pub auth: Auth,
    /// Maximum number of pages to fetch (`None` = until the cursor runs out)
    pub page_limit: Option<u32>,
}

impl PageRequest {
    /// Create a request for a public resource without a page limit
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: Auth::None,
            page_limit: None,
        }
    }

    /// Mark the resource as requiring credentials
    #[must_use]
    pub fn authorized(mut self) -> Self {
        self.auth = Auth::Required;
        self
    }

    /// Send credentials with each page only if the account has them
    #[must_use]
    pub fn with_session(mut self) -> Self {
        self.auth = Auth::Optional;
        self
    }

    /// Set the page limit
    #[must_use]
    pub fn page_limit(mut self, limit: Option<u32>) -> Self {
        self.page_limit = limit;
        self
    }

    /// URL for the page at `cursor`; the first page has no cursor
    pub fn url_for(&self, cursor: Option<&str>) -> String {
        let mut url = self.url.clone();
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair(CURSOR_PARAM, cursor);
        }
        url.into()
    }
}

/// State of one fetch loop; lives exactly as long as the loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Pages fetched and delivered so far
    pub pages_fetched: u32,
    /// Maximum pages to fetch
    pub page_limit: Option<u32>,
    /// Cursor for the next request
    pub cursor: Option<String>,
}

impl FetchState {
    /// Create a fresh state
    pub fn new(page_limit: Option<u32>) -> Self {
        Self {
            page_limit,
            ..Default::default()
        }
    }

    /// Pages still allowed (`None` = unbounded)
    pub fn remaining_limit(&self) -> Option<u32> {
        self.page_limit
            .map(|limit| limit.saturating_sub(self.pages_fetched))
    }

    /// Whether the page limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.remaining_limit() == Some(0)
    }

    /// Record a delivered page and move to its successor
    ///
    /// Returns false when the server reported no further pages.
    pub fn advance(&mut self, next_cursor: Option<String>) -> bool {
        self.pages_fetched += 1;
        self.cursor = next_cursor.none_if_empty();
        self.cursor.is_some()
    }
}
