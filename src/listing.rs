//! Generic filtered, paginated list machinery.
//!
//! Every list screen in the dashboard follows the same contract: a search
//! term, a set of named filters with `"all"` acting as the unconstrained
//! sentinel, one-based pagination, and quick stats derived from the fetched
//! page. [`ListResource`] owns that state and talks to a [`PageSource`],
//! tagging every fetch with a sequence number so a response that arrives
//! after a newer request was issued is discarded instead of clobbering the
//! screen with stale data.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Sentinel filter value meaning "no constraint".
pub const FILTER_ALL: &str = "all";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Message shown for transport-level failures; the underlying error goes to
/// the log, not the user.
pub const GENERIC_FETCH_ERROR: &str = "Failed to load data. Please try again.";

/// Clamps a requested page size to `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(per_page: usize) -> usize {
    per_page.clamp(1, MAX_PAGE_SIZE)
}

/// Query state owned by a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: String,
    filters: BTreeMap<String, String>,
    page: usize,
    per_page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Replaces the search term and resets to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Replaces one filter selection and resets to the first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
        self.page = 1;
    }

    /// Replaces the whole filter map and resets to the first page.
    pub fn set_filters(&mut self, filters: BTreeMap<String, String>) {
        self.filters = filters;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Clamps to `[1, MAX_PAGE_SIZE]` and resets to the first page.
    pub fn set_page_size(&mut self, per_page: usize) {
        self.per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
    }

    /// Renders `page=&limit=&search=&<filter>=` pairs. The search term is
    /// omitted when blank and filters valued [`FILTER_ALL`] (or empty) are
    /// omitted entirely. Filter order is the map's key order, so the output
    /// is deterministic for a given query.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        append_pair(&mut out, "page", &self.page.to_string());
        append_pair(&mut out, "limit", &self.per_page.to_string());

        let search = self.search.trim();
        if !search.is_empty() {
            append_pair(&mut out, "search", search);
        }
        for (key, value) in &self.filters {
            if value.is_empty() || value == FILTER_ALL {
                continue;
            }
            append_pair(&mut out, key, value);
        }
        out
    }
}

fn append_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(key);
    out.push('=');
    out.push_str(&percent_encode(value));
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Pagination metadata for one fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub fn empty() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

/// One page of items plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failure reported by the backing store or remote endpoint; the message
    /// is shown to the user verbatim.
    #[error("{0}")]
    Backend(String),
    /// Transport or decoding failure; logged, surfaced as a generic message.
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    fn user_message(&self) -> String {
        match self {
            FetchError::Backend(message) => message.clone(),
            FetchError::Transport(detail) => {
                log::error!("list fetch failed: {detail}");
                GENERIC_FETCH_ERROR.to_string()
            }
        }
    }
}

/// Something a [`ListResource`] can pull pages from.
pub trait PageSource<T> {
    fn fetch(&self, query: &ListQuery) -> Result<PageResult<T>, FetchError>;
    fn remove(&self, id: i32) -> Result<(), FetchError>;
}

/// Quick stats recomputed from the current page after every successful
/// fetch. These cover the fetched page only, never the full filtered set.
pub trait PageStats<T>: Default {
    fn from_page(items: &[T]) -> Self;
}

impl<T> PageStats<T> for () {
    fn from_page(_items: &[T]) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing fetched yet.
    Idle,
    /// Initial fetch in flight; callers may show a skeleton.
    Loading,
    /// Refetch in flight; last-known-good items stay visible.
    Filtering,
    Ready,
}

/// Handle tying a fetch completion back to the request that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "completing a fetch requires its ticket"]
pub struct FetchTicket {
    seq: u64,
}

/// State machine for one list screen.
#[derive(Debug)]
pub struct ListResource<T, St = ()> {
    query: ListQuery,
    status: ListStatus,
    items: Vec<T>,
    info: PageInfo,
    stats: St,
    error: Option<String>,
    seq: u64,
    loaded: bool,
}

impl<T, St: PageStats<T>> Default for ListResource<T, St> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, St: PageStats<T>> ListResource<T, St> {
    pub fn new() -> Self {
        Self {
            query: ListQuery::new(),
            status: ListStatus::Idle,
            items: Vec::new(),
            info: PageInfo::empty(),
            stats: St::default(),
            error: None,
            seq: 0,
            loaded: false,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn info(&self) -> &PageInfo {
        &self.info
    }

    pub fn stats(&self) -> &St {
        &self.stats
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the filter map (page resets to 1) and starts a fetch.
    pub fn set_filters(&mut self, filters: BTreeMap<String, String>) -> FetchTicket {
        self.query.set_filters(filters);
        self.begin()
    }

    /// Replaces the search term (page resets to 1) and starts a fetch.
    pub fn set_search(&mut self, term: impl Into<String>) -> FetchTicket {
        self.query.set_search(term);
        self.begin()
    }

    /// Moves to the given page (filters untouched) and starts a fetch.
    pub fn set_page(&mut self, page: usize) -> FetchTicket {
        self.query.set_page(page);
        self.begin()
    }

    /// Changes the page size (page resets to 1) and starts a fetch.
    pub fn set_page_size(&mut self, per_page: usize) -> FetchTicket {
        self.query.set_page_size(per_page);
        self.begin()
    }

    /// Re-issues the current query without changing any state.
    pub fn refresh(&mut self) -> FetchTicket {
        self.begin()
    }

    fn begin(&mut self) -> FetchTicket {
        self.seq += 1;
        self.status = if self.loaded {
            ListStatus::Filtering
        } else {
            ListStatus::Loading
        };
        FetchTicket { seq: self.seq }
    }

    /// Applies a fetch outcome. Returns `false` when the ticket is stale,
    /// i.e. a newer fetch was issued after this one started; the outcome is
    /// dropped in that case.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<PageResult<T>, FetchError>) -> bool {
        if ticket.seq != self.seq {
            return false;
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.info = page.info;
                self.stats = St::from_page(&self.items);
                self.error = None;
                self.loaded = true;
                self.status = ListStatus::Ready;
            }
            Err(err) => {
                // Last-known-good items and page info stay untouched.
                self.error = Some(err.user_message());
                self.status = if self.loaded {
                    ListStatus::Ready
                } else {
                    ListStatus::Idle
                };
            }
        }
        true
    }

    /// Runs one synchronous fetch against the source: begin, fetch, complete.
    pub fn sync<S: PageSource<T>>(&mut self, source: &S) -> bool {
        let ticket = self.begin();
        let result = source.fetch(&self.query);
        self.complete(ticket, result);
        self.error.is_none()
    }

    /// Deletes one entity and, on success, refetches the current page. The
    /// local page is never mutated ahead of server confirmation; on failure
    /// only the error message changes.
    pub fn remove<S: PageSource<T>>(&mut self, source: &S, id: i32) -> Result<(), String> {
        match source.remove(id) {
            Ok(()) => {
                self.sync(source);
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
