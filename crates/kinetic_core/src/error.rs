//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating pad/player configuration.
///
/// These never reach the scroll state machine: callers normalize invalid
/// values to safe defaults before applying a configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Autoplay interval is negative or not a finite number of milliseconds
    #[error("invalid autoplay interval: {0} ms")]
    InvalidAutoplayInterval(f64),

    /// Configuration text could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
