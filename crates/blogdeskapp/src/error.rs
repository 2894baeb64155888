use crate::auth::AuthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The backend answered 401. The stored credential has already been cleared.
    #[error("Session expired or unauthorized")]
    Unauthorized,

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with HTTP {status}")]
    Http { status: u16 },

    #[error("Server rejected the request: {0}")]
    Rejected(String),

    #[error("Could not decode server response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Blog not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlogError {
    /// Failures that mean the session is gone and the user must log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BlogError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
