//! Client-visible routes and the guard that redirects between them.
//!
//! | Path               | Logged out        | Logged in         |
//! |--------------------|-------------------|-------------------|
//! | `/`                | `/login`          | `/blog-management`|
//! | `/login`           | `/login`          | `/blog-management`|
//! | `/blog-management` | `/login`          | `/blog-management`|
//!
//! Unknown paths are treated like `/`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Login,
    BlogManagement,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::BlogManagement => "/blog-management",
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::BlogManagement)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolves a requested path to the route that is actually shown.
pub fn resolve(path: &str, authenticated: bool) -> Route {
    let requested = match path.trim().trim_end_matches('/') {
        "/login" => Route::Login,
        _ => Route::BlogManagement,
    };

    match (requested, authenticated) {
        (Route::BlogManagement, false) => Route::Login,
        (Route::Login, true) => Route::BlogManagement,
        (route, _) => route,
    }
}
