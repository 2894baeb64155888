//! # Backend Layer
//!
//! Abstract access to the blog REST API. The console never talks HTTP directly; it is
//! generic over [`BlogBackend`]:
//! - Production: [`http::HttpBackend`] (reqwest, bearer credential, 401 handling, timeout)
//! - Testing: [`memory::InMemoryBackend`] (a server simulation with failure injection)
//!
//! ## Contract Consumed
//!
//! | Operation | Request                                  | Response               |
//! |-----------|------------------------------------------|------------------------|
//! | list      | `GET /blogs?page&limit[&search]`         | `{data, total, page, limit}` |
//! | create    | `POST /blogs` body: record without id    | `{success, id}`        |
//! | update    | `PUT /blogs/:id` body: record            | `{success}`            |
//! | remove    | `DELETE /blogs/:id`                      | `{success}`            |
//!
//! No retries, no request deduplication and no caching happen at this layer.

use crate::error::{BlogError, Result};
use crate::model::{BlogDraft, BlogId, BlogRecord};
use serde::{Deserialize, Serialize};
use std::future::Future;

pub mod http;
pub mod memory;

/// Records per page. Fixed; the listing arithmetic depends on it.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl ListQuery {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            limit: PAGE_SIZE,
            search: search.into(),
        }
    }

    /// The `search` parameter is only sent when there is something to search for.
    pub fn search_param(&self) -> Option<&str> {
        if self.search.is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }
}

/// One page of records as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPage {
    pub records: Vec<BlogRecord>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReceipt {
    pub id: Option<BlogId>,
}

pub trait BlogBackend {
    fn list(&self, query: &ListQuery) -> impl Future<Output = Result<BlogPage>> + Send;

    fn create(&self, draft: &BlogDraft) -> impl Future<Output = Result<CreateReceipt>> + Send;

    fn update(&self, id: &BlogId, draft: &BlogDraft) -> impl Future<Output = Result<()>> + Send;

    fn remove(&self, id: &BlogId) -> impl Future<Output = Result<()>> + Send;
}

// --- Wire formats ---

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub data: Vec<BlogRecord>,
    #[serde(default)]
    pub total: u64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListResponse {
    /// Missing `page`/`limit` echoes fall back to what was asked for.
    pub fn into_page(self, query: &ListQuery) -> BlogPage {
        BlogPage {
            records: self.data,
            total: self.total,
            page: self.page.unwrap_or(query.page),
            limit: self.limit.unwrap_or(query.limit),
        }
    }
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub id: Option<BlogId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    #[serde(default = "default_success")]
    pub success: bool,
}

pub(crate) fn ensure_success(success: bool, operation: &str) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(BlogError::Rejected(format!("{} reported success: false", operation)))
    }
}
