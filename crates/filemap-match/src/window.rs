//! Time-window evaluation.

use crate::config::TimeDiffConfig;
use crate::error::{MatchError, MatchResult};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Result of evaluating a record timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The timestamp is too far in the future or the past.
    Matches,
    /// The timestamp is inside the acceptable window.
    NoMatch,
}

impl Decision {
    /// Whether the record fell outside the window.
    pub fn is_match(self) -> bool {
        self == Self::Matches
    }
}

/// Acceptable window of record timestamps relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    future: Option<TimeDelta>,
    past: Option<TimeDelta>,
}

fn offset(name: &'static str, seconds: u64) -> MatchResult<Option<TimeDelta>> {
    if seconds == 0 {
        return Ok(None);
    }
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .map(Some)
        .ok_or(MatchError::OffsetOutOfRange { name, seconds })
}

impl TimeWindow {
    /// Build a window from a validated configuration.
    ///
    /// # Errors
    /// Returns `MatchError::MissingOffset` if neither offset is set, or
    /// `MatchError::OffsetOutOfRange` for offsets too large to represent.
    pub fn from_config(config: &TimeDiffConfig) -> MatchResult<Self> {
        config.validate()?;
        Ok(Self {
            future: offset("future", config.future)?,
            past: offset("past", config.past)?,
        })
    }

    /// Evaluate `timestamp` against the window around `now`.
    ///
    /// Both bounds are inclusive: a record exactly `future` seconds ahead or
    /// exactly `past` seconds behind matches.
    pub fn evaluate_at(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Decision {
        if let Some(limit) = self.future.and_then(|f| now.checked_add_signed(f))
            && timestamp >= limit
        {
            debug!(%timestamp, %limit, "Record is too far in the future");
            return Decision::Matches;
        }

        if let Some(limit) = self.past.and_then(|p| now.checked_sub_signed(p))
            && timestamp <= limit
        {
            debug!(%timestamp, %limit, "Record is too far in the past");
            return Decision::Matches;
        }

        Decision::NoMatch
    }

    /// Evaluate `timestamp` against the window around the current time.
    pub fn evaluate(&self, timestamp: DateTime<Utc>) -> Decision {
        self.evaluate_at(timestamp, Utc::now())
    }
}
