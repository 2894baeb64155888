//! # Startup
//!
//! [`initialize`] turns a resolved [`BlogdeskConfig`] into a [`BlogdeskContext`]:
//!
//! 1. Resolve the session file: `session_file` from config, else `<data dir>/session`.
//! 2. Restore the [`Session`] from it. This is the only time the file is read.
//! 3. Build the [`SessionGuard`] with the static credential check.
//!
//! The HTTP backend is built lazily by [`BlogdeskContext::console`], so commands that never
//! talk to the server (`login`, `logout`, `config`) work with an unreachable or malformed
//! base URL.

use crate::auth::{SessionGuard, StaticAuthProvider};
use crate::backend::http::HttpBackend;
use crate::config::BlogdeskConfig;
use crate::console::BlogConsole;
use crate::error::Result;
use crate::session::{FileCredentialStore, Session};
use std::path::PathBuf;

pub struct BlogdeskContext {
    pub config: BlogdeskConfig,
    pub session_path: PathBuf,
    pub guard: SessionGuard<StaticAuthProvider>,
}

pub fn initialize(config: BlogdeskConfig) -> Result<BlogdeskContext> {
    let session_path = config.session_path()?;
    tracing::debug!(path = %session_path.display(), "restoring session");
    let session = Session::restore(FileCredentialStore::new(&session_path))?;
    let guard = SessionGuard::new(StaticAuthProvider::default(), session);

    Ok(BlogdeskContext {
        config,
        session_path,
        guard,
    })
}

impl BlogdeskContext {
    pub fn session(&self) -> &Session {
        self.guard.session()
    }

    /// The management view over the configured REST backend.
    pub fn console(&self) -> Result<BlogConsole<HttpBackend>> {
        let backend = HttpBackend::new(
            &self.config.base_url,
            self.config.timeout(),
            self.session().clone(),
        )?;
        Ok(BlogConsole::new(backend, self.session().clone()))
    }
}
