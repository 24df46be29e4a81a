//! Error types for Filemap Core.

use crate::config::CacheConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening or refreshing a [`FileMap`](crate::FileMap).
///
/// A missing key is not an error; lookups return `None` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be stat'ed.
    #[error("Failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shared advisory lock could not be acquired.
    #[error("Failed to acquire shared lock on {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the backing file failed part way through.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] CacheConfigError),
}

impl CacheError {
    /// Path of the backing file involved, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Open { path, .. }
            | Self::Stat { path, .. }
            | Self::Lock { path, .. }
            | Self::Read { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display_includes_path() {
        let err = CacheError::Stat {
            path: PathBuf::from("/tmp/hosts.map"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Failed to stat"));
        assert!(msg.contains("/tmp/hosts.map"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_cache_error_config_conversion() {
        let err: CacheError = CacheConfigError::InvalidMaxLineBytes.into();
        match err {
            CacheError::Config(CacheConfigError::InvalidMaxLineBytes) => {}
            _ => panic!("Expected Config error variant"),
        }
        assert!(CacheError::Config(CacheConfigError::EmptyPath).path().is_none());
    }

    #[test]
    fn test_cache_error_path_accessor() {
        let err = CacheError::Lock {
            path: PathBuf::from("map.txt"),
            source: std::io::Error::new(std::io::ErrorKind::WouldBlock, "busy"),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("map.txt")));
    }
}
