//! # Session
//!
//! The logged-in / logged-out duality is the presence of a persisted credential string.
//!
//! A [`Session`] is an explicit context object: it reads the persisted credential **once**
//! when restored at startup, hands the in-memory copy to whoever needs it (the HTTP backend
//! attaches it to every request), and writes through to the [`CredentialStore`] only on
//! [`Session::begin`] (login) and [`Session::end`] (logout or a 401 from the backend).
//!
//! `Session` is a cheap clonable handle. All clones observe the same state, so clearing the
//! credential from inside the HTTP layer is immediately visible to the console.
//!
//! ## Stores
//!
//! - [`FileCredentialStore`]: a single file under the OS data directory (production).
//! - [`MemoryCredentialStore`]: no persistence (testing).

use crate::error::{BlogError, Result};
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

const SESSION_FILE_NAME: &str = "session";

#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print credentials in logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Abstract persistence for the single credential string.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Token>>;
    fn save(&self, token: &Token) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/session`, e.g. `~/.local/share/blogdesk/session` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "blogdesk", "blogdesk").ok_or_else(|| {
            BlogError::Session("Could not determine the user data directory".to_string())
        })?;
        Ok(dirs.data_dir().join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Token>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(Token::new(raw)))
    }

    fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, token.as_str())?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory credential storage for testing. Does NOT persist.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<Token>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(Token::new(token))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Token>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &Token) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

struct SessionInner {
    token: RwLock<Option<Token>>,
    store: Box<dyn CredentialStore>,
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Reads the persisted credential once. Later changes to the store are not observed.
    pub fn restore(store: impl CredentialStore + 'static) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                store: Box::new(store),
            }),
        })
    }

    /// A logged-out session backed by memory only.
    pub fn ephemeral() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(None),
                store: Box::new(MemoryCredentialStore::new()),
            }),
        }
    }

    pub fn token(&self) -> Option<Token> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn begin(&self, token: Token) -> Result<()> {
        self.inner.store.save(&token)?;
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// Clears the credential in memory first, so a failing store still logs the user out
    /// for the rest of this process.
    pub fn end(&self) -> Result<()> {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.inner.store.clear()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
