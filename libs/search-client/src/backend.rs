//! Backend trait shared by every search service implementation

use crate::error::Result;
use crate::models::{Acknowledged, IndexSettings, QueryRequest};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Operations the query layer needs from a search service.
///
/// Implementations own their transport and retry policy. The query layer
/// never retries on its own.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute a search and return the raw response body.
    ///
    /// # Errors
    /// * `IndexMissing` - If the target index does not exist
    async fn search(&self, request: &QueryRequest) -> Result<JsonValue>;

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool>;

    /// Create an index with the given settings.
    ///
    /// # Errors
    /// * `IndexConflict` - If the index already exists
    async fn create_index(&self, index: &str, settings: &IndexSettings) -> Result<Acknowledged>;

    /// Delete an index.
    ///
    /// # Errors
    /// * `IndexMissing` - If the index does not exist
    async fn delete_index(&self, index: &str) -> Result<Acknowledged>;
}
