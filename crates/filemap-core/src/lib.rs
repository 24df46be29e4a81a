//! Filemap Core - self-refreshing lookup cache over a flat `key: value` file.
//!
//! This crate provides:
//! - A line parser for the `key: value` format
//! - A loader that reads the file under a shared advisory lock
//! - Modification-time based freshness checks
//! - [`FileMap`], a thread-safe cache that reloads the file when it changes
//!
//! # Example
//!
//! ```rust,no_run
//! use filemap_core::FileMap;
//!
//! fn main() -> filemap_core::Result<()> {
//!     let hosts = FileMap::open("/etc/filemap/hosts.map")?;
//!     if let Some(addr) = hosts.get("host1") {
//!         println!("host1 -> {addr}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod freshness;
pub mod loader;
pub mod lock;
pub mod parser;
pub mod snapshot;

pub use cache::{close_handle, CacheStats, FileMap, FileMapBuilder, Refresh};
pub use config::{CacheConfig, CacheConfigError, DEFAULT_MAX_LINE_BYTES};
pub use error::{CacheError, Result};
pub use freshness::Freshness;
pub use loader::Loader;
pub use lock::{AdvisoryLock, NoLock, SharedFileLock};
pub use parser::{parse_line, parse_reader, Entry};
pub use snapshot::Snapshot;
