//! Resource loading errors

use thiserror::Error;

/// Errors that can occur while opening a configuration resource
#[derive(Error, Debug)]
pub enum LoadError {
    /// Nothing exists at the location
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be read
    #[error("Unable to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    /// The location string could not be parsed
    #[error("Invalid location {location}: {message}")]
    InvalidLocation { location: String, message: String },

    /// The loader cannot open URLs with this scheme
    #[error("Unsupported scheme '{scheme}' in {location}")]
    UnsupportedScheme { scheme: String, location: String },
}

impl LoadError {
    /// Create an I/O error for a location
    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }

    /// Create an invalid location error
    pub fn invalid_location(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
