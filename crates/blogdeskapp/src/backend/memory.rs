//! In-memory backend for testing and development.
//!
//! Simulates the REST server: assigns ids, filters by search text (title or tags,
//! case-insensitive), paginates, and returns records in insertion order (not date order,
//! so the client-side sort is actually exercised). Every call is recorded and failures can
//! be queued to exercise error paths.

use super::{BlogBackend, BlogPage, CreateReceipt, ListQuery};
use crate::error::{BlogError, Result};
use crate::model::{BlogDraft, BlogId, BlogRecord};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List(ListQuery),
    Create(String),
    Update(BlogId),
    Remove(BlogId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    Network,
    Timeout,
    Unauthorized,
    Http(u16),
    Rejected,
}

impl SimulatedFailure {
    fn into_error(self) -> BlogError {
        match self {
            SimulatedFailure::Network => BlogError::Network("Simulated network error".into()),
            SimulatedFailure::Timeout => BlogError::Timeout,
            SimulatedFailure::Unauthorized => BlogError::Unauthorized,
            SimulatedFailure::Http(status) => BlogError::Http { status },
            SimulatedFailure::Rejected => BlogError::Rejected("Simulated rejection".into()),
        }
    }
}

#[derive(Default)]
struct ServerState {
    records: Vec<BlogRecord>,
    next_id: i64,
    calls: Vec<BackendCall>,
    failures: VecDeque<SimulatedFailure>,
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<ServerState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts directly, bypassing call recording and failures.
    pub fn insert(&self, draft: BlogDraft) -> BlogId {
        let mut state = self.state();
        state.next_id += 1;
        let id = BlogId::Number(state.next_id);
        state.records.push(draft.into_record(id.clone()));
        id
    }

    /// Records as the server currently holds them, in insertion order.
    pub fn records(&self) -> Vec<BlogRecord> {
        self.state().records.clone()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state().calls.clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::List(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Queue a failure for the next call, whatever operation it is.
    pub fn fail_next(&self, failure: SimulatedFailure) {
        self.state().failures.push_back(failure);
    }

    fn begin(&self, call: BackendCall) -> Result<MutexGuard<'_, ServerState>> {
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(state),
        }
    }
}

fn matches_search(record: &BlogRecord, search: &str) -> bool {
    let needle = search.to_lowercase();
    record.title.to_lowercase().contains(&needle) || record.tags.to_lowercase().contains(&needle)
}

impl BlogBackend for InMemoryBackend {
    async fn list(&self, query: &ListQuery) -> Result<BlogPage> {
        let state = self.begin(BackendCall::List(query.clone()))?;

        let matching: Vec<&BlogRecord> = state
            .records
            .iter()
            .filter(|r| query.search_param().map_or(true, |s| matches_search(r, s)))
            .collect();

        let limit = query.limit.max(1) as usize;
        let skip = (query.page.max(1) as usize - 1) * limit;
        let records = matching
            .iter()
            .skip(skip)
            .take(limit)
            .map(|r| (*r).clone())
            .collect();

        Ok(BlogPage {
            records,
            total: matching.len() as u64,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn create(&self, draft: &BlogDraft) -> Result<CreateReceipt> {
        let mut state = self.begin(BackendCall::Create(draft.title.clone()))?;
        state.next_id += 1;
        let id = BlogId::Number(state.next_id);
        state.records.push(draft.clone().into_record(id.clone()));
        Ok(CreateReceipt { id: Some(id) })
    }

    async fn update(&self, id: &BlogId, draft: &BlogDraft) -> Result<()> {
        let mut state = self.begin(BackendCall::Update(id.clone()))?;
        let record = state
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or(BlogError::Http { status: 404 })?;
        *record = draft.clone().into_record(id.clone());
        Ok(())
    }

    async fn remove(&self, id: &BlogId) -> Result<()> {
        let mut state = self.begin(BackendCall::Remove(id.clone()))?;
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(BlogError::Http { status: 404 });
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, NaiveDate};

    pub fn draft(title: &str, date: &str) -> BlogDraft {
        BlogDraft {
            title: title.to_string(),
            tags: String::new(),
            summary: format!("Summary of {}", title),
            date: crate::model::parse_date(date).expect("fixture date"),
            file_path: format!("posts/{}.md", title.to_lowercase().replace(' ', "-")),
        }
    }

    pub struct BackendFixture {
        pub backend: InMemoryBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: InMemoryBackend::new(),
            }
        }

        /// `count` blogs dated one day apart starting 2024-01-01, oldest inserted first.
        pub fn with_blogs(self, count: usize) -> Self {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            for i in 0..count {
                let mut d = draft(&format!("Blog {}", i + 1), "2024-01-01");
                d.date = start + Duration::days(i as i64);
                self.backend.insert(d);
            }
            self
        }

        pub fn with_blog(self, title: &str, date: &str) -> Self {
            self.backend.insert(draft(title, date));
            self
        }

        pub fn with_tagged_blog(self, title: &str, tags: &str, date: &str) -> Self {
            let mut d = draft(title, date);
            d.tags = tags.to_string();
            self.backend.insert(d);
            self
        }
    }
}
