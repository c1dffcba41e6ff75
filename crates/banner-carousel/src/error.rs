//! Error types for the carousel crate.
//!
//! Navigation, input and timer ticks are total and never fail. Only the
//! surfaces that ingest external data return these errors: configuration
//! loading and slide-deck construction.

use std::path::PathBuf;

use crate::slide::SlideId;

/// Result type alias for carousel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration or slide data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML configuration could not be parsed.
    #[error("Invalid carousel configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read carousel configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is outside its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// Two slides in one deck share an id.
    #[error("Duplicate slide id '{0}'")]
    DuplicateSlideId(SlideId),

    /// Slide data could not be parsed.
    #[error("Invalid slide data: {0}")]
    SlideData(#[from] serde_json::Error),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
