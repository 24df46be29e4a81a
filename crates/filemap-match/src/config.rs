//! Configuration for the time-window predicate.

use crate::error::{MatchError, MatchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Offsets, in seconds, around the current time.
///
/// A zero offset is treated as unset. At least one must be non-zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeDiffConfig {
    /// Records at or beyond `now + future` match.
    #[serde(default, alias = "Future")]
    pub future: u64,

    /// Records at or before `now - past` match.
    #[serde(default, alias = "Past")]
    pub past: u64,
}

impl TimeDiffConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `MatchError::MissingOffset` if neither offset is set.
    pub fn validate(&self) -> MatchResult<()> {
        if self.future == 0 && self.past == 0 {
            return Err(MatchError::MissingOffset);
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> MatchResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| MatchError::ParseError(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }
}
