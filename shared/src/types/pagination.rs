//! Pagination related types for list endpoints
//!
//! Listing endpoints take `page`/`limit` and answer with a [`Page`] envelope.
//! The dashboard drives them as an infinite scroll, which [`ScrollState`]
//! models so that out-of-order responses can be discarded.

use serde::{Deserialize, Serialize};

/// Default page size when the client sends none
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request
pub const MAX_LIMIT: u32 = 100;

const DEFAULT_PAGE: u32 = 1;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create a pagination, clamping both values into their valid ranges
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Build from optional query values, falling back to defaults
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// Number of records to skip
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Skip as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.skip() as i64
    }

    /// Limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Whether records remain after this page
    pub fn has_more(&self, total: u64) -> bool {
        self.skip() + u64::from(self.limit) < total
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,

    /// Client-supplied request sequence, echoed back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl<T> Page<T> {
    /// Create a page from the already-sliced items and the filtered total
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            limit: pagination.limit,
            has_more: pagination.has_more(total),
            seq: None,
        }
    }

    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), pagination, 0)
    }

    pub fn with_seq(mut self, seq: Option<u64>) -> Self {
        self.seq = seq;
        self
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
            seq: self.seq,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A fetch the scroll state wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub seq: u64,
    pub pagination: Pagination,
    pub search: Option<String>,
}

/// Client-side accumulator for an infinitely scrolling list.
///
/// Without a search term pages are appended. With a search term only the
/// latest page of results is kept. Every request carries a sequence number
/// and only the response to the most recent request is applied.
#[derive(Debug, Clone)]
pub struct ScrollState<T> {
    items: Vec<T>,
    search: Option<String>,
    limit: u32,
    upcoming_page: u32,
    has_more: bool,
    latest_seq: u64,
    in_flight: bool,
}

impl<T> ScrollState<T> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            search: None,
            limit: limit.clamp(1, MAX_LIMIT),
            upcoming_page: DEFAULT_PAGE,
            has_more: true,
            latest_seq: 0,
            in_flight: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Change the search term and restart from page 1.
    /// A blank term clears the search.
    pub fn search(&mut self, term: &str) -> ScrollRequest {
        let trimmed = term.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.restart()
    }

    /// Reload from page 1 with the current term, e.g. after a mutation
    pub fn refresh(&mut self) -> ScrollRequest {
        self.restart()
    }

    /// Request the following page, if there is one and nothing is loading
    pub fn next_page(&mut self) -> Option<ScrollRequest> {
        if !self.has_more || self.in_flight {
            return None;
        }
        Some(self.issue(self.upcoming_page))
    }

    /// Apply a response. Returns false when it answers a superseded request.
    pub fn apply(&mut self, seq: u64, page: Page<T>) -> bool {
        if seq != self.latest_seq {
            return false;
        }

        if page.page <= DEFAULT_PAGE || self.search.is_some() {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.has_more = page.has_more;
        self.upcoming_page = page.page + 1;
        self.in_flight = false;
        true
    }

    /// Mark the latest request as failed so it can be retried
    pub fn fail(&mut self, seq: u64) {
        if seq == self.latest_seq {
            self.in_flight = false;
        }
    }

    fn restart(&mut self) -> ScrollRequest {
        self.items.clear();
        self.has_more = true;
        self.upcoming_page = DEFAULT_PAGE;
        self.issue(DEFAULT_PAGE)
    }

    fn issue(&mut self, page: u32) -> ScrollRequest {
        self.latest_seq += 1;
        self.in_flight = true;
        ScrollRequest {
            seq: self.latest_seq,
            pagination: Pagination::new(page, self.limit),
            search: self.search.clone(),
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<u32>, page: u32, limit: u32, total: u64) -> Page<u32> {
        Page::new(items, Pagination::new(page, limit), total)
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let p = Pagination::from_query(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_LIMIT);

        let p = Pagination::new(0, 500);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, MAX_LIMIT);

        assert_eq!(Pagination::new(3, 10).skip(), 20);
    }

    #[test]
    fn test_has_more_boundaries() {
        assert!(Pagination::new(1, 10).has_more(11));
        assert!(!Pagination::new(1, 10).has_more(10));
        assert!(!Pagination::new(2, 10).has_more(15));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = page_of(vec![1, 2], 1, 2, 5).with_seq(Some(7));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["seq"], 7);
        assert_eq!(json["total"], 5);
    }

    #[test]
    fn test_scroll_appends_pages() {
        let mut scroll = ScrollState::new(2);
        let first = scroll.next_page().unwrap();
        assert!(scroll.apply(first.seq, page_of(vec![1, 2], 1, 2, 3)));

        let second = scroll.next_page().unwrap();
        assert_eq!(second.pagination.page, 2);
        assert!(scroll.apply(second.seq, page_of(vec![3], 2, 2, 3)));

        assert_eq!(scroll.items(), &[1, 2, 3]);
        assert!(!scroll.has_more());
        assert!(scroll.next_page().is_none());
    }

    #[test]
    fn test_scroll_discards_stale_response() {
        let mut scroll = ScrollState::new(10);
        let slow = scroll.search("al");
        let fast = scroll.search("alice");

        assert!(scroll.apply(fast.seq, page_of(vec![42], 1, 10, 1)));
        assert!(!scroll.apply(slow.seq, page_of(vec![1, 2, 3], 1, 10, 3)));
        assert_eq!(scroll.items(), &[42]);
    }

    #[test]
    fn test_search_replaces_instead_of_accumulating() {
        let mut scroll = ScrollState::new(1);
        let req = scroll.search("bob");
        assert_eq!(req.search.as_deref(), Some("bob"));
        scroll.apply(req.seq, page_of(vec![1], 1, 1, 2));

        let req = scroll.next_page().unwrap();
        scroll.apply(req.seq, page_of(vec![2], 2, 1, 2));
        assert_eq!(scroll.items(), &[2]);
    }

    #[test]
    fn test_blank_search_clears_term() {
        let mut scroll: ScrollState<u32> = ScrollState::new(10);
        scroll.search("x");
        let req = scroll.search("   ");
        assert!(req.search.is_none());
        assert!(scroll.search_term().is_none());
    }

    #[test]
    fn test_no_concurrent_next_while_loading() {
        let mut scroll: ScrollState<u32> = ScrollState::new(10);
        let req = scroll.next_page().unwrap();
        assert!(scroll.next_page().is_none());
        scroll.fail(req.seq);
        assert!(scroll.next_page().is_some());
    }
}
