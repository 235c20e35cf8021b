//! Error types for braintrust-export
//!
//! One error enum covers the whole pipeline. Whether an error aborts the run or
//! only degrades a single resource is decided where the error is handled, not
//! by the variant.

use thiserror::Error;

/// Result type alias for braintrust-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for braintrust-export
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api_url")
        key: Option<String>,
    },

    /// No API key in the environment
    #[error("missing API key: set BRAINTRUST_API_KEY")]
    MissingApiKey,

    /// The project listing came back empty
    #[error("no projects available")]
    NoProjects,

    /// The operator's project choice could not be resolved
    #[error("invalid project selection '{input}': {reason}")]
    InvalidSelection {
        /// What the operator entered
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// A named remote object does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status
    #[error("API request to {url} failed with HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
        /// Response body, as returned by the server
        body: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Build a selection error
    pub fn invalid_selection(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidSelection {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
