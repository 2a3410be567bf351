//! Common error types for Anchor

use thiserror::Error;

/// Common result type for Anchor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Anchor crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed data could not be parsed (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record or job not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or seed data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
