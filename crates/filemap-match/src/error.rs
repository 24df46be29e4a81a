use thiserror::Error;

/// Result type for time-window operations.
pub type MatchResult<T> = std::result::Result<T, MatchError>;

/// Errors raised while configuring a time window.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Neither offset is set.
    #[error("either `future` or `past` must be configured")]
    MissingOffset,

    /// An offset is too large to add to a timestamp.
    #[error("offset `{name}` of {seconds}s is out of range")]
    OffsetOutOfRange { name: &'static str, seconds: u64 },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("failed to parse configuration file: {0}")]
    ParseError(String),
}
