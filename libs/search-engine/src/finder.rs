//! Entry point for building queries against a model.

use crate::config::{PaginationConfig, SiftConfig};
use crate::engine::SearchEngine;
use crate::model::Searchable;
use crate::pagination::PageResolver;
use crate::registry::BuilderRegistry;
use crate::Result;
use sift_client::{ElasticClient, SearchBackend};
use std::sync::Arc;

/// Shared state every query is built from, created once at startup.
#[derive(Clone)]
pub struct SearchContext {
    pub backend: Arc<dyn SearchBackend>,
    pub registry: BuilderRegistry,
    pub pages: Arc<dyn PageResolver>,
    pub pagination: PaginationConfig,
}

impl SearchContext {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        registry: BuilderRegistry,
        pages: Arc<dyn PageResolver>,
    ) -> Self {
        Self {
            backend,
            registry,
            pages,
            pagination: PaginationConfig::default(),
        }
    }

    /// Connect an HTTP backend from `config.client`.
    pub fn from_config(
        config: &SiftConfig,
        registry: BuilderRegistry,
        pages: Arc<dyn PageResolver>,
    ) -> Result<Self> {
        let backend = ElasticClient::from_config(&config.client)?;
        tracing::debug!(hosts = ?backend.hosts(), "Search backend configured");

        Ok(Self {
            backend: Arc::new(backend),
            registry,
            pages,
            pagination: config.pagination.clone(),
        })
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Fresh builder for `model`, specialized by whatever builder the registry
/// holds for `M`.
///
/// Creates the model's index if it does not exist yet.
pub async fn finder<M: Searchable>(ctx: &SearchContext, model: M) -> Result<SearchEngine<M>> {
    let domain = ctx.registry.resolve::<M>();
    let engine =
        SearchEngine::new(ctx.backend.clone(), model, domain, ctx.pages.clone()).await?;
    Ok(engine.with_pagination(&ctx.pagination))
}
