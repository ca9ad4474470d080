//! Storage configuration supplied at startup

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the storage location
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the logical database name
pub const DATABASE_NAME_ENV: &str = "DATABASE_NAME";

/// Where documents are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// SQLite file path, optionally prefixed with `sqlite://` or `sqlite:`
    pub url: String,
    /// Logical name reported by diagnostics
    pub name: String,
}

impl StorageConfig {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let config = Self {
            url: url.into().trim().to_string(),
            name: name.into().trim().to_string(),
        };

        if config.url.is_empty() {
            return Err(Error::Config(format!("{} is empty", DATABASE_URL_ENV)));
        }
        if config.name.is_empty() {
            return Err(Error::Config(format!("{} is empty", DATABASE_NAME_ENV)));
        }
        if config.path().as_os_str() == ":memory:" {
            return Err(Error::Config(
                "in-memory SQLite is not shared across pooled connections; use a file path"
                    .to_string(),
            ));
        }

        Ok(config)
    }

    /// Read `DATABASE_URL` and `DATABASE_NAME` from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_ENV)
            .ok_or_else(|| Error::Config(format!("{} is not set", DATABASE_URL_ENV)))?;
        let name = lookup(DATABASE_NAME_ENV)
            .ok_or_else(|| Error::Config(format!("{} is not set", DATABASE_NAME_ENV)))?;
        Self::new(url, name)
    }

    /// Filesystem path of the SQLite database
    pub fn path(&self) -> PathBuf {
        let raw = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url);
        Path::new(raw).to_path_buf()
    }
}
