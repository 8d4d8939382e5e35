//! Index lifecycle around a builder's declared settings.

use crate::Result;
use sift_client::{Acknowledged, IndexSettings, SearchBackend};
use std::sync::Arc;

/// Creates, deletes and flushes indices on the shared backend.
#[derive(Clone)]
pub struct IndexManager {
    backend: Arc<dyn SearchBackend>,
}

impl IndexManager {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Create the index if the backend reports it absent.
    ///
    /// Two callers racing past the existence check will both issue a create;
    /// the loser gets `IndexConflict` from the backend. Returns whether this
    /// call created the index.
    pub async fn ensure(&self, index: &str, settings: &IndexSettings) -> Result<bool> {
        if self.backend.index_exists(index).await? {
            return Ok(false);
        }
        self.create(index, settings).await?;
        Ok(true)
    }

    /// Create unconditionally. An existing index is a backend-reported conflict.
    pub async fn create(&self, index: &str, settings: &IndexSettings) -> Result<Acknowledged> {
        tracing::info!(
            index = %index,
            shards = settings.number_of_shards,
            replicas = settings.number_of_replicas,
            "Creating search index"
        );
        Ok(self.backend.create_index(index, settings).await?)
    }

    pub async fn delete(&self, index: &str) -> Result<Acknowledged> {
        tracing::info!(index = %index, "Deleting search index");
        Ok(self.backend.delete_index(index).await?)
    }

    pub async fn exists(&self, index: &str) -> Result<bool> {
        Ok(self.backend.index_exists(index).await?)
    }

    /// Delete then recreate the index.
    ///
    /// Not atomic: if the create fails the index stays absent and the caller
    /// has to recreate it.
    pub async fn flush(&self, index: &str, settings: &IndexSettings) -> Result<String> {
        self.delete(index).await?;
        self.create(index, settings).await?;
        Ok(format!("All Models Deleted from {}", index))
    }
}
