//! Error types for the PermKit core library.

use thiserror::Error;

/// Result type alias using the PermKit core Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for PermKit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A platform probe (manifest query, telephony lookup, ...) failed.
    #[error("Platform query failed: {0}")]
    Platform(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}
