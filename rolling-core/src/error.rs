//! Error types for Rolling

use thiserror::Error;

/// Result type alias for Rolling operations
pub type Result<T> = std::result::Result<T, RollingError>;

/// Rolling error types
///
/// Every variant is a precondition violation on the caller's side. None of
/// them are transient, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollingError {
    /// The window holds no observations, and no identity element exists
    #[error("Window is empty: no value to aggregate")]
    EmptyWindow,

    /// Fixed windows must hold at least one observation
    #[error("Invalid window size: {0} (must be positive)")]
    InvalidWindowSize(usize),

    /// Time windows must span a non-negative duration
    #[error("Invalid window duration: {0} (must be non-negative)")]
    InvalidWindowDuration(String),

    /// A timestamp went backwards
    #[error("Out of order time: {current} is earlier than {previous}")]
    OutOfOrderTime { previous: String, current: String },

    /// A timestamp that has no ordering, such as a NaN `f64`
    #[error("Unordered time: {0} cannot be compared with other times")]
    UnorderedTime(String),

    /// More elements were dropped than the window holds
    #[error("Drop count exceeded: requested {requested}, window holds {available}")]
    DropCountExceeded { requested: usize, available: usize },

    /// A time window was given an observation without a timestamp
    #[error("Missing time: time windows need a timestamp for every observation")]
    MissingTime,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RollingError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        false
    }
}
