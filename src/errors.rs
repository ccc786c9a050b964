//! Shared error types for the screening pipeline.
//!
//! Every failure the library can produce is recoverable: the caller gets a
//! descriptive message and may retry with corrected input. Nothing is
//! written or replaced when an error is returned.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dyscreen operations
#[derive(Debug, Error)]
pub enum Error {
    /// Upload text is structurally unusable (too few lines, missing header labels)
    #[error("File format error: {0}")]
    Format(String),

    /// A field is still not a number after default substitution
    #[error("Parse error in field '{field}': {message}")]
    Parse { field: String, message: String },

    /// Manually entered values outside the accepted domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scoring profile or configuration file problems
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors with the path involved
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the user can fix this by changing their input or config.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
