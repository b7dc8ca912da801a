//! Error types for the hero_core library.
//!
//! Ledger operations never fail; these errors only come from the
//! infrastructure around the ledger (files, config, argument parsing).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hero_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A string that is not a canonical `YYYY-MM-DD` date key
    #[error("Invalid date key: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),

    /// Calendar year outside the supported date range
    #[error("Calendar error: {0}")]
    Calendar(String),

    /// Persistence layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
