//! Error types for the edges of the override engine.
//!
//! Matching and threshold resolution never fail. Errors only come from
//! compiling patterns and from loading settings or data files.

use thiserror::Error;

/// Errors that can occur while compiling patterns or loading inputs.
#[derive(Debug, Error)]
pub enum OverridesError {
    /// An override pattern could not be compiled.
    #[error("Invalid pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// Settings could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A data file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file is not valid JSON for the expected shape.
    #[error("Failed to parse data: {0}")]
    Json(#[from] serde_json::Error),
}
