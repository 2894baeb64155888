//! # Authentication and the Session Guard
//!
//! Access to the management view is gated solely on the presence of a credential. There is
//! no token validation on the client: the backend answers 401 for anything it dislikes, and
//! the HTTP layer turns that into a logout.
//!
//! Credential checking sits behind [`AuthProvider`]. The shipped [`StaticAuthProvider`]
//! compares against fixed literal values and hands out a fixed literal token. It is a
//! placeholder for a real identity provider, which can be dropped in without changing the
//! [`SessionGuard`] contract.

use crate::error::Result;
use crate::routes::{self, Route};
use crate::session::{Session, Token};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "12345";
pub const DEFAULT_TOKEN: &str = "jwt_token_here";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

pub trait AuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> std::result::Result<Token, AuthError>;
}

/// Fixed username/password pair issuing a fixed token. Not a security mechanism.
pub struct StaticAuthProvider {
    username: String,
    password: String,
    token: String,
}

impl StaticAuthProvider {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
        }
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD, DEFAULT_TOKEN)
    }
}

impl AuthProvider for StaticAuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> std::result::Result<Token, AuthError> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(Token::new(self.token.clone()))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

pub struct SessionGuard<A: AuthProvider = StaticAuthProvider> {
    provider: A,
    session: Session,
}

impl<A: AuthProvider> SessionGuard<A> {
    pub fn new(provider: A, session: Session) -> Self {
        Self { provider, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Route actually shown for a requested path, given the current session.
    pub fn resolve(&self, path: &str) -> Route {
        routes::resolve(path, self.is_authenticated())
    }

    /// On success persists the issued token and grants access to the management view.
    pub fn login(&self, credentials: &Credentials) -> Result<Route> {
        match self.provider.authenticate(credentials) {
            Ok(token) => {
                self.session.begin(token)?;
                tracing::info!(username = %credentials.username, "logged in");
                Ok(Route::BlogManagement)
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, "login rejected");
                Err(e.into())
            }
        }
    }

    pub fn logout(&self) -> Result<Route> {
        self.session.end()?;
        tracing::info!("logged out");
        Ok(Route::Login)
    }
}
