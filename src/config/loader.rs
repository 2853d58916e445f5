//! External configuration file loading.
//!
//! Configuration artifacts (dimension and metric templates) are JSON files
//! resolved relative to a configured root. Loading is a single synchronous
//! attempt: the file either parses or the caller gets the error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses external JSON configuration files into template types.
#[derive(Debug, Clone)]
pub struct ExternalConfigLoader {
    root: PathBuf,
}

impl ExternalConfigLoader {
    /// A loader resolving file names against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and parse one configuration file under the root.
    pub fn parse_file<T: DeserializeOwned>(&self, file_name: &str) -> Result<T, ConfigError> {
        let text = fs::read_to_string(self.root.join(file_name))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Parse configuration text directly, bypassing the filesystem.
    pub fn parse_str<T: DeserializeOwned>(text: &str) -> Result<T, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
