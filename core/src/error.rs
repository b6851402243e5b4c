//! Error types for timing configuration.

use thiserror::Error;

/// Result type alias for fallible timing operations.
pub type Result<T> = std::result::Result<T, TimerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The requested severity name is not one of
    /// debug, info, warning (warn), error, critical (fatal).
    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),
}
