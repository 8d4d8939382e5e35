use super::{SearchEngine, DEFAULT_PAGE_NAME, DEFAULT_PAGE_SIZE};
use crate::builder::DomainBuilder;
use crate::config::PaginationConfig;
use crate::formatters::AggregationFormatters;
use crate::index::IndexManager;
use crate::model::{index_name, Searchable};
use crate::pagination::PageResolver;
use crate::query::{self, ClauseStore};
use crate::results::{PageResult, ResultMaterializer};
use crate::Result;
use sift_client::{Acknowledged, QueryRequest, SearchBackend};
use std::sync::Arc;
use tracing::Instrument as _;

impl<M: Searchable> SearchEngine<M> {
    /// Create a builder for `model`, creating its index if the backend does
    /// not have it yet.
    pub async fn new(
        backend: Arc<dyn SearchBackend>,
        model: M,
        domain: Arc<dyn DomainBuilder>,
        pages: Arc<dyn PageResolver>,
    ) -> Result<Self> {
        let index = index_name(&model);
        let indices = IndexManager::new(backend.clone());
        indices.ensure(&index, &domain.mappings(&index)).await?;

        let mut formatters = AggregationFormatters::new();
        domain.register_formatters(&mut formatters);
        tracing::debug!(index = %index, formatters = formatters.len(), "Search builder ready");

        Ok(Self {
            backend,
            indices,
            model,
            domain,
            formatters,
            pages,
            index,
            clauses: ClauseStore::new(),
            size: DEFAULT_PAGE_SIZE,
            page: 1,
            page_name: DEFAULT_PAGE_NAME.to_string(),
            track_total_hits: true,
        })
    }

    pub(crate) fn with_pagination(mut self, pagination: &PaginationConfig) -> Self {
        self.size = pagination.default_size;
        self.page_name = pagination.page_name.clone();
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn clauses(&self) -> &ClauseStore {
        &self.clauses
    }

    pub fn formatters(&self) -> &AggregationFormatters {
        &self.formatters
    }

    pub(crate) fn page_resolver(&self) -> &dyn PageResolver {
        self.pages.as_ref()
    }

    /// The request `paginate` would send with the current paging settings.
    pub fn compile(&self) -> QueryRequest {
        query::compile(
            &self.clauses,
            &self.index,
            self.page,
            self.size,
            self.track_total_hits,
        )
    }

    /// Execute with the default page size and page name, resolving the page
    /// from the page resolver.
    pub async fn paginate(self) -> Result<PageResult<M::Record>> {
        let size = self.size;
        let page_name = self.page_name.clone();
        self.paginate_with(size, &page_name, None).await
    }

    /// Execute the query and materialize one page of results.
    ///
    /// `page` falls back to the page resolver when `None`.
    pub async fn paginate_with(
        mut self,
        size: u32,
        page_name: &str,
        page: Option<i64>,
    ) -> Result<PageResult<M::Record>> {
        let page = page.unwrap_or_else(|| self.pages.current_page(page_name));
        self.size = size;
        self.page = page;

        let request = self.compile();
        let span = tracing::debug_span!("search", index = %self.index, page, size);

        async {
            tracing::debug!(body = %request.to_body(), "Executing search");
            let raw = self.backend.search(&request).await?;
            ResultMaterializer::from_engine(&self)
                .materialize(raw, page, size, page_name)
                .await
        }
        .instrument(span)
        .await
    }

    /// Delete and recreate the index, dropping every document.
    pub async fn flush(&self) -> Result<String> {
        self.indices
            .flush(&self.index, &self.domain.mappings(&self.index))
            .await
    }

    pub async fn create_index(&self) -> Result<Acknowledged> {
        self.indices
            .create(&self.index, &self.domain.mappings(&self.index))
            .await
    }

    pub async fn delete_index(&self) -> Result<Acknowledged> {
        self.indices.delete(&self.index).await
    }

    pub async fn index_exists(&self) -> Result<bool> {
        self.indices.exists(&self.index).await
    }
}
