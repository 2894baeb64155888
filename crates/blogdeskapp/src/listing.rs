//! # Listing & Pagination
//!
//! [`ListingState`] owns the page of records currently shown, the search text, and the
//! load status. It is a plain state machine:
//!
//! ```text
//!            begin_fetch()                 apply_page()
//!  idle ──────────────────▶ loading ───────────────────▶ loaded
//!  loaded/error ──────────▶    │
//!                              │ apply_failure()
//!                              ▼
//!                            error   (previous records stay visible)
//! ```
//!
//! The state never performs I/O. [`refresh`] glues it to a [`BlogBackend`].
//!
//! ## Invariants
//!
//! - `records` is exactly the last successful fetch, replaced wholesale. A failed fetch
//!   leaves them untouched.
//! - The displayed order is always `date` descending. The sort is stable, so records sharing
//!   a date keep the server's relative order.
//! - `total_pages = ceil(total_count / PAGE_SIZE)`.
//! - Changing the search text resets `page` to 1.
//! - Navigation moves by exactly one page and clamps to `[1, total_pages]`.
//! - After a fetch the server's `page` echo is authoritative, even when it lies past the last
//!   page (e.g. after deleting the only record on the final page). That is not corrected.

use crate::backend::{BlogBackend, BlogPage, ListQuery, PAGE_SIZE};
use crate::error::Result;
use crate::model::BlogRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    records: Vec<BlogRecord>,
    page: u32,
    page_size: u32,
    total_count: u64,
    search_query: String,
    status: LoadStatus,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            page: 1,
            page_size: PAGE_SIZE,
            total_count: 0,
            search_query: String::new(),
            status: LoadStatus::Idle,
        }
    }

    /// Starts at an arbitrary `(page, search)` pair, e.g. from command-line flags.
    /// The page is not clamped here; the server's echo settles it on the first fetch.
    pub fn at(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search_query: search.into(),
            ..Self::new()
        }
    }

    /// Records sorted by date, most recent first.
    pub fn records(&self) -> &[BlogRecord] {
        &self.records
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size);
        self.total_count.div_ceil(size) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// False when there are no pages at all.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn find(&self, id: &crate::model::BlogId) -> Option<&BlogRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// The query for the current `(page, search)` pair.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.page_size,
            search: self.search_query.clone(),
        }
    }

    /// Returns true when the text changed, in which case the page is back to 1
    /// and a fetch is due.
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.search_query {
            return false;
        }
        self.search_query = query;
        self.page = 1;
        true
    }

    /// Returns true when the page moved.
    pub fn next_page(&mut self) -> bool {
        let target = (self.page + 1).min(self.total_pages().max(1));
        self.move_to(target)
    }

    /// Returns true when the page moved.
    pub fn previous_page(&mut self) -> bool {
        let target = self.page.saturating_sub(1).max(1);
        self.move_to(target)
    }

    fn move_to(&mut self, target: u32) -> bool {
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn begin_fetch(&mut self) -> ListQuery {
        self.status = LoadStatus::Loading;
        self.query()
    }

    pub fn apply_page(&mut self, page: BlogPage) {
        let mut records = page.records;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        self.records = records;
        self.total_count = page.total;
        self.page = page.page.max(1);
        self.status = LoadStatus::Loaded;
    }

    pub fn apply_failure(&mut self) {
        self.status = LoadStatus::Error;
    }
}

/// Runs one fetch cycle for the current `(page, search)` pair.
pub async fn refresh<B: BlogBackend>(backend: &B, state: &mut ListingState) -> Result<()> {
    let query = state.begin_fetch();
    match backend.list(&query).await {
        Ok(page) => {
            state.apply_page(page);
            Ok(())
        }
        Err(e) => {
            state.apply_failure();
            Err(e)
        }
    }
}
