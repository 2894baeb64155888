//! # Configuration
//!
//! Configuration is loaded by [`confique`], layered in priority order:
//! 1. **Environment variables**: `BLOGDESK_BASE_URL`, `BLOGDESK_TIMEOUT_SECS`, `BLOGDESK_SESSION_FILE`.
//! 2. **Config file**: `blogdesk.toml`, either passed explicitly or found in the OS config
//!    directory (via `directories`). A missing file is not an error.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! Command-line flags (`--base-url`) are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_url` | `http://localhost:3001/api` | Root of the blog REST API |
//! | `timeout_secs` | `10` | Per-request timeout |
//! | `session_file` | `<data dir>/session` | Where the credential is persisted |
//!
//! The page size is fixed at 10 and is not configurable.

use crate::error::{BlogError, Result};
use crate::session::FileCredentialStore;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "blogdesk.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogdeskConfig {
    /// Root URL of the blog REST API.
    #[config(env = "BLOGDESK_BASE_URL", default = "http://localhost:3001/api")]
    pub base_url: String,

    /// Seconds before a request is abandoned.
    #[config(env = "BLOGDESK_TIMEOUT_SECS", default = 10)]
    pub timeout_secs: u64,

    /// Overrides the location of the persisted credential.
    #[config(env = "BLOGDESK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

impl Default for BlogdeskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            session_file: None,
        }
    }
}

impl BlogdeskConfig {
    /// Loads from the environment and `path`, or the default config file when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let mut builder = Self::builder().env();
        if let Some(file) = &file {
            tracing::debug!(path = %file.display(), "loading config file");
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| BlogError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured session file, or the OS data-directory default.
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => FileCredentialStore::default_path(),
        }
    }
}

/// `<config dir>/blogdesk.toml`, e.g. `~/.config/blogdesk/blogdesk.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "blogdesk", "blogdesk")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_local_server() {
        let config = BlogdeskConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "base_url = \"http://blogs.example.com/api\"\ntimeout_secs = 3\nsession_file = \"/tmp/s\"\n",
        )
        .unwrap();

        let config = BlogdeskConfig::builder().file(&path).load().unwrap();
        assert_eq!(config.base_url, "http://blogs.example.com/api");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.session_path().unwrap(), PathBuf::from("/tmp/s"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BlogdeskConfig::builder()
            .file(dir.path().join("absent.toml"))
            .load()
            .unwrap();
        assert_eq!(config, BlogdeskConfig::default());
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let config = BlogdeskConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn base_url_override() {
        let config = BlogdeskConfig::default().with_base_url("http://x/api");
        assert_eq!(config.base_url, "http://x/api");
    }
}
