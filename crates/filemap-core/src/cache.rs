//! Self-refreshing lookup cache over a `key: value` file.
//!
//! Every lookup stats the backing file under the cache mutex and reloads it
//! when its modification time has moved past the one recorded at the last
//! successful load. Freshness check, reload and point query share one critical
//! section, so a lookup never observes a half-built table.

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::freshness::{self, Freshness};
use crate::loader::Loader;
use crate::lock::{AdvisoryLock, NoLock, SharedFileLock};
use crate::snapshot::Snapshot;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The file was not modified; the current snapshot stays.
    Unchanged,
    /// The file was reloaded and a new snapshot installed.
    Reloaded {
        /// Number of entries in the new snapshot.
        entries: usize,
    },
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries in the current snapshot.
    pub entries: usize,
    /// Successful reloads after the initial load.
    pub reloads: u64,
    /// Refresh attempts that failed and fell back to the current snapshot.
    pub failed_refreshes: u64,
    /// Lookups that found their key.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// Modification time recorded at the last successful load.
    pub recorded_mtime: Option<SystemTime>,
}

/// State guarded by the cache mutex.
#[derive(Debug)]
struct State {
    snapshot: Snapshot,
    recorded_mtime: Option<SystemTime>,
    reloads: u64,
    failed_refreshes: u64,
    hits: u64,
    misses: u64,
}

/// Read-through lookup cache backed by a flat text file.
///
/// Share it between threads with `Arc<FileMap>`.
#[derive(Debug)]
pub struct FileMap {
    path: PathBuf,
    loader: Loader,
    state: Mutex<State>,
}

/// Builder for [`FileMap`] with a custom lock implementation.
#[derive(Debug)]
pub struct FileMapBuilder {
    config: CacheConfig,
    lock: Option<Arc<dyn AdvisoryLock>>,
}

impl FileMapBuilder {
    /// Start from a configuration.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config, lock: None }
    }

    /// Set the line bound.
    #[must_use]
    pub fn max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.config.max_line_bytes = max_line_bytes;
        self
    }

    /// Use `lock` instead of the lock selected by the configuration.
    #[must_use]
    pub fn advisory_lock(mut self, lock: impl AdvisoryLock + 'static) -> Self {
        self.lock = Some(Arc::new(lock));
        self
    }

    /// Validate the configuration and perform the initial load.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or the file cannot be stat'ed,
    /// opened, locked or read. No cache is returned in that case.
    pub fn open(self) -> Result<FileMap> {
        self.config.validate()?;

        let lock: Arc<dyn AdvisoryLock> = match self.lock {
            Some(lock) => lock,
            None if self.config.advisory_lock => Arc::new(SharedFileLock),
            None => Arc::new(NoLock),
        };
        let loader = Loader::new(self.config.max_line_bytes, lock);
        let path = self.config.path;

        let mtime = freshness::modified_time(&path).map_err(|source| CacheError::Stat {
            path: path.clone(),
            source,
        })?;
        let snapshot = loader.load(&path)?;

        info!(path = %path.display(), entries = snapshot.len(), "Loaded file map");

        Ok(FileMap {
            path,
            loader,
            state: Mutex::new(State {
                snapshot,
                recorded_mtime: Some(mtime),
                reloads: 0,
                failed_refreshes: 0,
                hits: 0,
                misses: 0,
            }),
        })
    }
}

impl FileMap {
    /// Open a cache over `path` with default settings.
    ///
    /// The file is loaded synchronously before this returns.
    ///
    /// # Errors
    /// Fails if the file cannot be stat'ed, opened, locked or read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Open a cache from a configuration.
    pub fn open_with(config: CacheConfig) -> Result<Self> {
        FileMapBuilder::from_config(config).open()
    }

    /// Create a builder for a cache over `path`.
    pub fn builder(path: impl Into<PathBuf>) -> FileMapBuilder {
        FileMapBuilder::from_config(CacheConfig::new(path))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up `key`, reloading the file first if it changed.
    ///
    /// The returned value is an independent copy that outlives later reloads
    /// and the cache itself. A failed refresh is logged and the current
    /// snapshot is queried instead.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut state = self.lock_state();
        self.refresh_or_keep(&mut state);

        let value = state.snapshot.get(key).map(str::to_owned);
        if value.is_some() {
            state.hits += 1;
            debug!(key, "Cache hit");
        } else {
            state.misses += 1;
            debug!(key, "Cache miss");
        }
        value
    }

    /// Whether `key` is present, reloading the file first if it changed.
    pub fn contains_key(&self, key: &str) -> bool {
        let mut state = self.lock_state();
        self.refresh_or_keep(&mut state);
        state.snapshot.contains_key(key)
    }

    /// All entries in key order, reloading the file first if it changed.
    ///
    /// The pairs are copied out of a single snapshot.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut state = self.lock_state();
        self.refresh_or_keep(&mut state);
        state
            .snapshot
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Run the freshness check and report its outcome.
    ///
    /// # Errors
    /// Returns the stat or load error; the current snapshot is kept.
    pub fn refresh(&self) -> Result<Refresh> {
        let mut state = self.lock_state();
        self.refresh_locked(&mut state)
    }

    /// Entries in the current snapshot. Does not check the file.
    pub fn len(&self) -> usize {
        self.lock_state().snapshot.len()
    }

    /// Whether the current snapshot is empty. Does not check the file.
    pub fn is_empty(&self) -> bool {
        self.lock_state().snapshot.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock_state();
        CacheStats {
            entries: state.snapshot.len(),
            reloads: state.reloads,
            failed_refreshes: state.failed_refreshes,
            hits: state.hits,
            misses: state.misses,
            recorded_mtime: state.recorded_mtime,
        }
    }

    /// Release the cache and its snapshot.
    pub fn close(self) {
        debug!(path = %self.path.display(), "Closing file map");
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        // The snapshot is only ever replaced by assignment, so a poisoned
        // guard still holds a complete generation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_or_keep(&self, state: &mut State) {
        if let Err(e) = self.refresh_locked(state) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Refresh failed, serving cached entries"
            );
        }
    }

    fn refresh_locked(&self, state: &mut State) -> Result<Refresh> {
        let checked = freshness::check(&self.path, state.recorded_mtime).map_err(|source| {
            CacheError::Stat {
                path: self.path.clone(),
                source,
            }
        });

        let mtime = match checked {
            Ok(Freshness::Current) => return Ok(Refresh::Unchanged),
            Ok(Freshness::Modified(mtime)) => mtime,
            Err(e) => {
                state.failed_refreshes += 1;
                return Err(e);
            }
        };

        match self.loader.load(&self.path) {
            Ok(snapshot) => {
                let entries = snapshot.len();
                // Old generation is dropped here, still under the lock.
                state.snapshot = snapshot;
                state.recorded_mtime = Some(mtime);
                state.reloads += 1;
                info!(path = %self.path.display(), entries, "Reloaded file map");
                Ok(Refresh::Reloaded { entries })
            }
            Err(e) => {
                state.failed_refreshes += 1;
                Err(e)
            }
        }
    }
}

/// Close a cache handle if there is one.
pub fn close_handle(handle: Option<FileMap>) {
    if let Some(map) = handle {
        map.close();
    }
}
