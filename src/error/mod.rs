//! Error handling for the patient directory.
//!
//! Two families of failure exist: the dataset could not be read or trusted
//! (IO, parse, invalid content), or the caller sent query parameters that do
//! not validate. The HTTP layer maps the first family to a 500 and the second
//! to a 400.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for the patient directory
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Error opening or reading the dataset file
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dataset file is not valid JSON for the patient schema
    #[error("Failed to parse dataset {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset parsed but violates a record invariant
    #[error("Invalid dataset {}: {reason}", path.display())]
    InvalidDataset { path: PathBuf, reason: String },

    /// Query parameters failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration could not be assembled
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP listener failed
    #[error("HTTP server error: {0}")]
    Server(#[source] io::Error),
}

impl DirectoryError {
    /// Create an IO error for the given path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-dataset error for the given path
    pub fn invalid_dataset(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error originates from the backing dataset rather than the caller
    #[must_use]
    pub const fn is_dataset_failure(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Parse { .. } | Self::InvalidDataset { .. }
        )
    }
}

/// A query parameter that could not be accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The value is not a non-negative integer
    #[error("Parameter '{name}' must be a non-negative integer, got '{value}'")]
    NotAnInteger { name: &'static str, value: String },

    /// The value parsed but lies outside the accepted range
    #[error("Parameter '{name}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// The value is not one of the accepted names
    #[error("Parameter '{name}' must be one of [{}], got '{value}'", expected.join(", "))]
    UnknownVariant {
        name: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// The query string itself could not be decoded, e.g. a repeated key
    #[error("Malformed query string: {reason}")]
    MalformedQuery { reason: String },

    /// `minAge` is greater than `maxAge`
    #[error("minAge ({min_age}) must not exceed maxAge ({max_age})")]
    InvertedAgeRange { min_age: u32, max_age: u32 },
}

/// Result type for patient directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;
