//! # Console Facade
//!
//! [`BlogConsole`] is the management view: the single entry point UIs drive, generic over
//! [`BlogBackend`] the same way the rest of the crate is generic over storage:
//! - Production: `BlogConsole<HttpBackend>`
//! - Testing: `BlogConsole<InMemoryBackend>`
//!
//! ## Role and Responsibilities
//!
//! - Owns the [`ListingState`] and re-fetches on mount, page change and search change.
//! - Owns the open [`Modal`] and runs mutations through [`mutation::execute`].
//! - After any successful mutation, closes the modal and re-fetches the current
//!   `(page, search)` exactly once. Records are never patched locally.
//! - Converts every backend failure into one user-facing banner string. Only usage errors
//!   (unknown id on the current page, nothing open to submit) come back as `Err`.
//! - On `Unauthorized` the session is already cleared by the backend; the console leaves the
//!   view: the listing is discarded, the modal closed, and [`BlogConsole::route`] becomes
//!   [`Route::Login`].
//!
//! ## What the Console Does NOT Do
//!
//! - Retry, debounce or cancel requests. Each call runs to completion before the next,
//!   because every operation takes `&mut self`.
//! - Render anything. [`BlogConsole::view`] returns a serializable snapshot.

use crate::backend::BlogBackend;
use crate::error::{BlogError, Result};
use crate::form::{BlogForm, FormField};
use crate::listing::{self, ListingState};
use crate::model::BlogId;
use crate::mutation::{self, Modal, MutationKind, FETCH_FAILURE_MESSAGE};
use crate::routes::{self, Route};
use crate::session::Session;
use crate::view::{self, ManagementView};
use serde::Serialize;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl ConsoleMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

pub struct BlogConsole<B: BlogBackend> {
    backend: B,
    session: Session,
    route: Route,
    listing: ListingState,
    modal: Modal,
    error: Option<String>,
    messages: Vec<ConsoleMessage>,
}

impl<B: BlogBackend> BlogConsole<B> {
    pub fn new(backend: B, session: Session) -> Self {
        let route = routes::resolve(Route::BlogManagement.path(), session.is_authenticated());
        Self {
            backend,
            session,
            route,
            listing: ListingState::new(),
            modal: Modal::None,
            error: None,
            messages: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The banner message, if the last operation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn take_messages(&mut self) -> Vec<ConsoleMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn view(&self) -> ManagementView {
        view::management(self.route, &self.listing, &self.modal, self.error.as_deref())
    }

    // --- Listing ---

    /// Enters the management view on page 1 with no search.
    pub async fn mount(&mut self) {
        self.mount_at(1, "").await;
    }

    /// Enters the management view at a given `(page, search)` pair.
    pub async fn mount_at(&mut self, page: u32, search: &str) {
        self.route = routes::resolve(Route::BlogManagement.path(), self.session.is_authenticated());
        if self.route != Route::BlogManagement {
            return;
        }
        self.listing = ListingState::at(page, search);
        self.modal = Modal::None;
        self.fetch().await;
    }

    pub async fn reload(&mut self) {
        self.fetch().await;
    }

    /// Applies a search immediately. Unchanged text does not trigger a fetch.
    pub async fn set_search(&mut self, query: &str) {
        if self.listing.set_search(query) {
            self.fetch().await;
        }
    }

    pub async fn next_page(&mut self) {
        if self.listing.next_page() {
            self.fetch().await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.listing.previous_page() {
            self.fetch().await;
        }
    }

    async fn fetch(&mut self) {
        if self.route != Route::BlogManagement {
            return;
        }
        self.error = None;
        if let Err(e) = listing::refresh(&self.backend, &mut self.listing).await {
            self.absorb_failure(e, FETCH_FAILURE_MESSAGE);
        }
    }

    // --- Modals ---

    pub fn open_add_form(&mut self) {
        self.modal = Modal::AddForm(BlogForm::blank_today());
    }

    /// The "Add New Blog" control: opens the add form, or closes it when already open.
    pub fn toggle_add_form(&mut self) {
        if matches!(self.modal, Modal::AddForm(_)) {
            self.modal = Modal::None;
        } else {
            self.open_add_form();
        }
    }

    pub fn open_edit(&mut self, id: &BlogId) -> Result<()> {
        let target = self.find(id)?.clone();
        self.modal = Modal::Edit {
            form: BlogForm::from_record(&target),
            target,
        };
        Ok(())
    }

    pub fn open_delete(&mut self, id: &BlogId) -> Result<()> {
        let target = self.find(id)?.clone();
        self.modal = Modal::ConfirmDelete(target);
        Ok(())
    }

    /// Closes whatever is open. A pending deletion target is discarded without side effects.
    pub fn cancel(&mut self) {
        self.modal = Modal::None;
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        let form = self
            .modal
            .form_mut()
            .ok_or_else(|| BlogError::InvalidState("No form is open".to_string()))?;
        form.set(field, value);
        Ok(())
    }

    fn find(&self, id: &BlogId) -> Result<&crate::model::BlogRecord> {
        self.listing
            .find(id)
            .ok_or_else(|| BlogError::NotFound(id.to_string()))
    }

    // --- Mutations ---

    /// Submits the open form or confirmation.
    ///
    /// Returns `Ok(true)` when the mutation succeeded (modal closed, view re-fetched) and
    /// `Ok(false)` when it failed (modal still open, banner set).
    pub async fn submit(&mut self) -> Result<bool> {
        let kind = self
            .modal
            .kind()
            .ok_or_else(|| BlogError::InvalidState("No form or confirmation is open".into()))?;

        match mutation::execute(&self.backend, &self.modal).await {
            Ok(kind) => {
                self.modal = Modal::None;
                self.messages
                    .push(ConsoleMessage::success(kind.success_message()));
                self.fetch().await;
                Ok(true)
            }
            Err(BlogError::Validation(msg)) => {
                self.error = Some(msg);
                Ok(false)
            }
            Err(e) => {
                self.absorb_failure(e, kind.failure_message());
                Ok(false)
            }
        }
    }

    /// Confirms the pending deletion.
    pub async fn confirm_delete(&mut self) -> Result<bool> {
        if self.modal.kind() != Some(MutationKind::Delete) {
            return Err(BlogError::InvalidState(
                "No deletion is awaiting confirmation".to_string(),
            ));
        }
        self.submit().await
    }

    // --- Session ---

    pub fn logout(&mut self) -> Result<()> {
        self.session.end()?;
        self.leave_view();
        Ok(())
    }

    fn leave_view(&mut self) {
        self.route = Route::Login;
        self.listing = ListingState::new();
        self.modal = Modal::None;
        self.error = None;
    }

    fn absorb_failure(&mut self, e: BlogError, message: &str) {
        if e.is_unauthorized() {
            // The HTTP layer already cleared the store; this covers other backends.
            if let Err(err) = self.session.end() {
                tracing::warn!(error = %err, "failed to clear stored credential");
            }
            self.leave_view();
            self.messages
                .push(ConsoleMessage::warning(SESSION_EXPIRED_MESSAGE));
            return;
        }
        tracing::warn!(error = %e, "{}", message);
        self.error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::BackendFixture;
    use crate::backend::memory::{BackendCall, InMemoryBackend, SimulatedFailure};
    use crate::backend::ListQuery;
    use crate::listing::LoadStatus;
    use crate::session::MemoryCredentialStore;

    fn logged_in() -> Session {
        Session::restore(MemoryCredentialStore::with_token("jwt_token_here")).unwrap()
    }

    async fn mounted(backend: InMemoryBackend) -> BlogConsole<InMemoryBackend> {
        let mut console = BlogConsole::new(backend, logged_in());
        console.mount().await;
        console.backend().clear_calls();
        console
    }

    #[tokio::test]
    async fn mount_without_session_routes_to_login() {
        let mut console = BlogConsole::new(InMemoryBackend::new(), Session::ephemeral());
        console.mount().await;
        assert_eq!(console.route(), Route::Login);
        assert!(console.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn mount_fetches_first_page() {
        let mut console = BlogConsole::new(BackendFixture::new().with_blogs(3).backend, logged_in());
        console.mount().await;
        assert_eq!(console.route(), Route::BlogManagement);
        assert_eq!(console.listing().status(), LoadStatus::Loaded);
        assert_eq!(console.backend().list_calls(), vec![ListQuery::new(1, "")]);
    }

    #[tokio::test]
    async fn search_resets_page_before_fetching() {
        let mut console = mounted(BackendFixture::new().with_blogs(25).backend).await;
        console.next_page().await;
        assert_eq!(console.listing().page(), 2);

        console.set_search("Blog 1").await;

        let calls = console.backend().list_calls();
        assert_eq!(calls.last().unwrap(), &ListQuery::new(1, "Blog 1"));
        assert_eq!(console.listing().page(), 1);
    }

    #[tokio::test]
    async fn clamped_navigation_does_not_fetch() {
        let mut console = mounted(BackendFixture::new().with_blogs(5).backend).await;
        console.previous_page().await;
        console.next_page().await;
        assert!(console.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn successful_add_closes_form_and_refetches_once() {
        let mut console = mounted(InMemoryBackend::new()).await;
        console.open_add_form();
        console.set_field(FormField::Title, "Hello").unwrap();
        console.set_field(FormField::Summary, "World").unwrap();
        console.set_field(FormField::FilePath, "hello.md").unwrap();

        assert!(console.submit().await.unwrap());

        assert!(!console.modal().is_open());
        assert_eq!(console.backend().list_calls().len(), 1);
        assert_eq!(console.listing().records().len(), 1);
        assert_eq!(
            console.take_messages(),
            vec![ConsoleMessage::success("Blog added")]
        );
    }

    #[tokio::test]
    async fn failed_update_keeps_modal_open_with_message() {
        let mut console = mounted(BackendFixture::new().with_blog("A", "2024-01-01").backend).await;
        console.open_edit(&BlogId::Number(1)).unwrap();
        console.backend().fail_next(SimulatedFailure::Http(500));

        assert!(!console.submit().await.unwrap());

        assert_eq!(console.error(), Some("Failed to update blog"));
        assert!(matches!(console.modal(), Modal::Edit { .. }));
        assert!(console.backend().list_calls().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_confirmation_and_cancel_has_no_side_effects() {
        let mut console = mounted(BackendFixture::new().with_blog("Hello", "2024-01-01").backend).await;

        console.open_delete(&BlogId::Number(1)).unwrap();
        console.cancel();
        assert!(console.backend().calls().is_empty());
        assert!(console.confirm_delete().await.is_err());

        console.open_delete(&BlogId::Number(1)).unwrap();
        assert!(console.confirm_delete().await.unwrap());
        assert_eq!(
            console.backend().calls(),
            vec![
                BackendCall::Remove(BlogId::Number(1)),
                BackendCall::List(ListQuery::new(1, "")),
            ]
        );
    }

    #[tokio::test]
    async fn unauthorized_leaves_the_view() {
        let mut console = mounted(BackendFixture::new().with_blogs(2).backend).await;
        console.open_edit(&BlogId::Number(1)).unwrap();
        console.backend().fail_next(SimulatedFailure::Unauthorized);

        console.reload().await;

        assert_eq!(console.route(), Route::Login);
        assert!(!console.session().is_authenticated());
        assert!(!console.modal().is_open());
        assert!(console.listing().records().is_empty());
        assert_eq!(
            console.take_messages(),
            vec![ConsoleMessage::warning(SESSION_EXPIRED_MESSAGE)]
        );
    }

    #[tokio::test]
    async fn fetch_failure_keeps_stale_rows_and_success_clears_banner() {
        let mut console = mounted(BackendFixture::new().with_blogs(2).backend).await;
        console.backend().fail_next(SimulatedFailure::Timeout);

        console.reload().await;
        assert_eq!(console.error(), Some("Failed to fetch blogs"));
        assert_eq!(console.listing().records().len(), 2);

        console.reload().await;
        assert_eq!(console.error(), None);
    }

    #[tokio::test]
    async fn opening_a_modal_replaces_the_previous_one() {
        let mut console = mounted(BackendFixture::new().with_blog("A", "2024-01-01").backend).await;
        console.open_add_form();
        console.open_delete(&BlogId::Number(1)).unwrap();
        assert_eq!(console.modal().kind(), Some(MutationKind::Delete));

        console.toggle_add_form();
        assert_eq!(console.modal().kind(), Some(MutationKind::Add));
        console.toggle_add_form();
        assert!(!console.modal().is_open());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let mut console = mounted(InMemoryBackend::new()).await;
        assert!(matches!(
            console.open_edit(&BlogId::Number(42)),
            Err(BlogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn validation_error_is_shown_without_backend_call() {
        let mut console = mounted(InMemoryBackend::new()).await;
        console.open_add_form();
        assert!(!console.submit().await.unwrap());
        assert_eq!(console.error(), Some("Title is required"));
        assert!(console.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn logout_discards_listing() {
        let mut console = mounted(BackendFixture::new().with_blogs(2).backend).await;
        console.logout().unwrap();
        assert_eq!(console.route(), Route::Login);
        assert!(console.listing().records().is_empty());
        assert!(!console.session().is_authenticated());
    }
}
