//! REST backend over reqwest.
//!
//! Every request reads the credential from the [`Session`] and, when present, sends it as
//! `Authorization: Bearer <token>`. Without a credential the request goes out unauthenticated
//! and the server decides.
//!
//! A 401 from any endpoint ends the session (clearing the persisted credential) and surfaces
//! as [`BlogError::Unauthorized`]. Callers treat that as terminal for the request and route
//! the user back to the login view. Requests abort after the configured timeout and surface
//! as [`BlogError::Timeout`].

use super::{
    ensure_success, AckResponse, BlogBackend, BlogPage, CreateReceipt, CreateResponse,
    ListQuery, ListResponse,
};
use crate::error::{BlogError, Result};
use crate::model::{BlogDraft, BlogId};
use crate::session::Session;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpBackend {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BlogError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BlogError::Config(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BlogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BlogError::Config(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %response.url(), "backend answered 401, ending session");
            if let Err(e) = self.session.end() {
                tracing::warn!(error = %e, "failed to clear stored credential");
            }
            return Err(BlogError::Unauthorized);
        }

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url = %response.url(), "request failed");
            return Err(BlogError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Decodes a JSON body. An empty body (e.g. `204 No Content`) decodes as `{}`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await.map_err(transport_error)?;
        let body: &str = if text.trim().is_empty() { "{}" } else { &text };
        serde_json::from_str(body).map_err(|e| BlogError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> BlogError {
    if e.is_timeout() {
        BlogError::Timeout
    } else if e.is_decode() {
        BlogError::Decode(e.to_string())
    } else {
        BlogError::Network(e.to_string())
    }
}

impl BlogBackend for HttpBackend {
    async fn list(&self, query: &ListQuery) -> Result<BlogPage> {
        let url = self.endpoint(&["blogs"])?;
        tracing::debug!(%url, page = query.page, search = %query.search, "GET blogs");

        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(search) = query.search_param() {
            params.push(("search", search.to_string()));
        }

        let response = self.send(self.client.get(url).query(&params)).await?;
        let body: ListResponse = Self::decode(response).await?;
        Ok(body.into_page(query))
    }

    async fn create(&self, draft: &BlogDraft) -> Result<CreateReceipt> {
        let url = self.endpoint(&["blogs"])?;
        tracing::debug!(%url, title = %draft.title, "POST blog");

        let response = self.send(self.client.post(url).json(draft)).await?;
        let body: CreateResponse = Self::decode(response).await?;
        ensure_success(body.success, "create")?;
        Ok(CreateReceipt { id: body.id })
    }

    async fn update(&self, id: &BlogId, draft: &BlogDraft) -> Result<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["blogs", &id_segment])?;
        tracing::debug!(%url, "PUT blog");

        let record = draft.clone().into_record(id.clone());
        let response = self.send(self.client.put(url).json(&record)).await?;
        let body: AckResponse = Self::decode(response).await?;
        ensure_success(body.success, "update")
    }

    async fn remove(&self, id: &BlogId) -> Result<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["blogs", &id_segment])?;
        tracing::debug!(%url, "DELETE blog");

        let response = self.send(self.client.delete(url)).await?;
        let body: AckResponse = Self::decode(response).await?;
        ensure_success(body.success, "delete")
    }
}
