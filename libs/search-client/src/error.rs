//! Error types for search-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Search backend errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Search backend unavailable after {attempts} attempt(s): {reason}")]
    BackendUnavailable { attempts: u32, reason: String },

    #[error("Index already exists: {0}")]
    IndexConflict(String),

    #[error("Index not found: {0}")]
    IndexMissing(String),

    #[error("Backend returned status {status}: {reason}")]
    Backend { status: u16, reason: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
