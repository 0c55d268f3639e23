//! Error types for jobgrid.

use thiserror::Error;

/// Result type alias using jobgrid's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jobgrid operations.
///
/// A cache miss is not represented here: it is a normal control-flow
/// outcome (`Option::None` from the cache) that triggers a fresh fetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Upstream provider returned a non-success status, a malformed
    /// payload, or exceeded its timeout.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Secondary per-record detail fetch failed. Recovered locally by the
    /// enricher; never surfaced as a page-level failure.
    #[error("Detail fetch error: {0}")]
    DetailFetch(String),

    /// Provider selector does not match any registered board.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Filter value cannot be safely encoded for any provider.
    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    /// Invalid request input (page number, page size).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed (disk cache tier)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Upstream(format!("Request timed out: {}", e))
        } else {
            Error::Upstream(e.to_string())
        }
    }
}
