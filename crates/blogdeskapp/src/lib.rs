//! # Blogdesk Architecture
//!
//! Blogdesk administers blog post metadata (title, tags, summary, date, file path) held by
//! a REST backend. It is a **UI-agnostic library**: the terminal client in the `blogdesk`
//! crate is one front-end, and nothing in here writes to stdout or exits the process.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI (blogdesk crate)                                        │
//! │  - Parses arguments, prompts, renders views                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Guard (auth.rs, routes.rs)                         │
//! │  - Static credential check, login / logout, route redirects │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Console (console.rs)                                       │
//! │  - Listing & pagination (listing.rs)                        │
//! │  - Modals and mutations (mutation.rs, form.rs)              │
//! │  - Serializable view snapshots (view.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend (backend/)                                         │
//! │  - Abstract BlogBackend trait                               │
//! │  - HttpBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`session::Session`] is passed explicitly to both the guard and the backend. It is
//! read once at startup and written only on login, logout, and a 401 from the server.
//!
//! ## Consistency Model
//!
//! The server is the source of truth. After any successful create, update or delete, the
//! console re-fetches the current page and search exactly once. Records are never merged
//! locally.
//!
//! ## Testing Strategy
//!
//! 1. **Units** (`#[cfg(test)]` in each module): state machines and formatting, against
//!    `InMemoryBackend` and `MemoryCredentialStore`.
//! 2. **HTTP** (`tests/http_backend.rs`): the REST contract against a local axum stub.
//! 3. **Workflows** (`tests/console_workflow.rs`): end-to-end console scenarios.
//!
//! ## Module Overview
//!
//! - [`console`]: The management-view facade, entry point for UIs
//! - [`auth`]: Credential check and the session guard
//! - [`routes`]: Client-visible routes and redirects
//! - [`session`]: Credential persistence
//! - [`backend`]: REST contract, HTTP and in-memory implementations
//! - [`listing`]: Page/search state machine
//! - [`mutation`]: Modal states and mutation dispatch
//! - [`form`]: Editable form fields and validation
//! - [`view`]: Display snapshots
//! - [`model`]: Blog records
//! - [`config`]: Configuration loading
//! - [`init`]: Startup wiring
//! - [`error`]: Error types

pub mod auth;
pub mod backend;
pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod init;
pub mod listing;
pub mod model;
pub mod mutation;
pub mod routes;
pub mod session;
pub mod view;
