//! Error types for the query layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport, index lifecycle and backend status errors.
    #[error(transparent)]
    Client(#[from] sift_client::Error),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("No formatter registered for aggregation: {0}")]
    UnformattedAggregation(String),

    #[error("Record lookup failed: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn is_index_missing(&self) -> bool {
        matches!(self, Error::Client(sift_client::Error::IndexMissing(_)))
    }

    pub fn is_index_conflict(&self) -> bool {
        matches!(self, Error::Client(sift_client::Error::IndexConflict(_)))
    }

    pub fn is_backend_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Client(sift_client::Error::BackendUnavailable { .. })
        )
    }
}
