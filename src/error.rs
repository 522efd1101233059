//! Error types for content retrieval and rendering support

use thiserror::Error;

/// Errors surfaced by the content client, pagination and formatting helpers
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Cannot format date: {0}")]
    Format(String),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// A required field was absent or had the wrong type
    pub fn missing(field: &str) -> Self {
        Error::MalformedResponse(format!("missing or invalid field `{}`", field))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
