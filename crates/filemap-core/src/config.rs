//! Configuration for file-backed caches.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default line bound, one byte short of a 4 KiB line buffer.
pub const DEFAULT_MAX_LINE_BYTES: usize = 4095;

/// Configuration for a [`FileMap`](crate::FileMap).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Path to the backing `key: value` file.
    pub path: PathBuf,

    /// Longest line the loader keeps; the rest of a longer line is dropped.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Take a shared advisory lock on the file while reading it.
    #[serde(default = "default_advisory_lock")]
    pub advisory_lock: bool,
}

fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

fn default_advisory_lock() -> bool {
    true
}

/// Errors that can occur while loading or validating a [`CacheConfig`].
#[derive(Debug, Error)]
pub enum CacheConfigError {
    /// The backing file path is empty.
    #[error("Invalid path: must not be empty")]
    EmptyPath,

    /// Invalid line bound (must be > 0).
    #[error("Invalid max line bytes: must be greater than 0")]
    InvalidMaxLineBytes,

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

impl CacheConfig {
    /// Create a configuration for `path` with default loader settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_line_bytes: default_max_line_bytes(),
            advisory_lock: default_advisory_lock(),
        }
    }

    /// Set the line bound.
    #[must_use]
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Enable or disable the shared advisory lock.
    #[must_use]
    pub fn with_advisory_lock(mut self, enabled: bool) -> Self {
        self.advisory_lock = enabled;
        self
    }

    /// Validate the cache configuration.
    ///
    /// # Errors
    /// Returns `CacheConfigError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), CacheConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(CacheConfigError::EmptyPath);
        }

        if self.max_line_bytes == 0 {
            return Err(CacheConfigError::InvalidMaxLineBytes);
        }

        Ok(())
    }

    /// Load a configuration from a TOML file.
    ///
    /// A relative `path` inside the file is resolved against the directory
    /// containing the configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, CacheConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CacheConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| CacheConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        if config.path.is_relative()
            && let Some(parent) = path.parent()
        {
            config.path = parent.join(&config.path);
        }

        config.validate()?;
        Ok(config)
    }
}
