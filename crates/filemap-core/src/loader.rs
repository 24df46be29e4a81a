//! Loads snapshots from the backing file.

use crate::config::DEFAULT_MAX_LINE_BYTES;
use crate::error::{CacheError, Result};
use crate::lock::{AdvisoryLock, SharedFileLock};
use crate::parser;
use crate::snapshot::Snapshot;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Reads the backing file into a fresh [`Snapshot`].
#[derive(Debug, Clone)]
pub struct Loader {
    max_line_bytes: usize,
    lock: Arc<dyn AdvisoryLock>,
}

impl Loader {
    /// Create a loader with the given line bound and lock implementation.
    pub fn new(max_line_bytes: usize, lock: Arc<dyn AdvisoryLock>) -> Self {
        Self { max_line_bytes, lock }
    }

    /// Line bound used when reading.
    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Open, lock and parse `path`.
    ///
    /// The shared lock is held for the whole read and released before
    /// returning.
    ///
    /// # Errors
    /// Returns `CacheError::Open`, `CacheError::Lock` or `CacheError::Read`.
    /// Nothing is returned on failure, so the caller keeps its previous
    /// snapshot.
    pub fn load(&self, path: &Path) -> Result<Snapshot> {
        let file = File::open(path).map_err(|source| CacheError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.lock
            .try_lock_shared(&file)
            .map_err(|source| CacheError::Lock {
                path: path.to_path_buf(),
                source,
            })?;

        let parsed = parser::parse_reader(BufReader::new(&file), self.max_line_bytes);

        if let Err(e) = self.lock.unlock(&file) {
            debug!(path = %path.display(), error = %e, "Failed to release shared lock");
        }

        parsed.map_err(|source| CacheError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_BYTES, Arc::new(SharedFileLock))
    }
}
