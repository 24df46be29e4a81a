//! Filemap Match
//!
//! Time-window predicate for timestamped records:
//! - Configure a `future` and/or `past` offset in seconds (`TimeDiffConfig`)
//! - Build a `TimeWindow` from it
//! - Ask whether a record timestamp falls outside the window around now

pub mod config;
pub mod error;
pub mod window;

pub use config::TimeDiffConfig;
pub use error::{MatchError, MatchResult};
pub use window::{Decision, TimeWindow};
