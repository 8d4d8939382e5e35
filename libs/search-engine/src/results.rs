//! Result materialization
//!
//! Converts a raw search response into a [`PageResult`] by:
//! - Reading the total hit count
//! - Resolving hit identifiers into records through the model
//! - Building length-aware pagination links
//! - Running every returned aggregation through its registered formatter

use crate::engine::SearchEngine;
use crate::formatters::AggregationFormatters;
use crate::model::Searchable;
use crate::pagination::{PageLinks, PageResolver};
use crate::{Error, Result};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// One page of search results.
///
/// Built once per `paginate` call and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PageResult<R> {
    total_hits: u64,
    models: Vec<R>,
    links: PageLinks,
    aggregations: Map<String, JsonValue>,
    raw: JsonValue,
}

impl<R> PageResult<R> {
    /// Total hit count exactly as reported by the backend.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Records for this page, in backend hit order.
    pub fn models(&self) -> &[R] {
        &self.models
    }

    pub fn into_models(self) -> Vec<R> {
        self.models
    }

    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Formatted aggregation summaries keyed by aggregation name.
    pub fn aggregations(&self) -> &Map<String, JsonValue> {
        &self.aggregations
    }

    pub fn aggregation(&self, name: &str) -> Option<&JsonValue> {
        self.aggregations.get(name)
    }

    /// The untouched backend response.
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }
}

/// Turns raw responses into [`PageResult`]s for one model.
pub struct ResultMaterializer<'a, M: Searchable> {
    model: &'a M,
    formatters: &'a AggregationFormatters,
    pages: &'a dyn PageResolver,
}

impl<'a, M: Searchable> ResultMaterializer<'a, M> {
    pub fn new(
        model: &'a M,
        formatters: &'a AggregationFormatters,
        pages: &'a dyn PageResolver,
    ) -> Self {
        Self {
            model,
            formatters,
            pages,
        }
    }

    pub fn from_engine(engine: &'a SearchEngine<M>) -> Self {
        Self::new(engine.model(), engine.formatters(), engine.page_resolver())
    }

    /// Materialize `raw` as page `page` of size `size`.
    ///
    /// Aggregations are formatted before records are looked up, so an
    /// unformatted aggregation fails without touching the record store.
    ///
    /// # Errors
    /// * `MalformedResponse` - If the total or the hit list is missing
    /// * `UnformattedAggregation` - If an aggregation has no formatter
    pub async fn materialize(
        &self,
        raw: JsonValue,
        page: i64,
        size: u32,
        page_name: &str,
    ) -> Result<PageResult<M::Record>> {
        let total_hits = total_hits(&raw)?;
        let aggregations = self.format_aggregations(&raw)?;

        let models = if size == 0 {
            Vec::new()
        } else {
            let ids = hit_ids(&raw)?;
            self.resolve(&ids).await?
        };

        let links = PageLinks::new(total_hits, size, page, self.pages.current_path(), page_name);

        Ok(PageResult {
            total_hits,
            models,
            links,
            aggregations,
            raw,
        })
    }

    async fn resolve(&self, ids: &[String]) -> Result<Vec<M::Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = self.model.find_by_ids(ids).await?;

        // The lookup returns records in its own order; restore hit order.
        let positions: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        records.retain(|r| positions.contains_key(M::record_key(r).as_str()));
        records.sort_by_cached_key(|r| positions[M::record_key(r).as_str()]);

        if records.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                resolved = records.len(),
                "Some search hits have no matching record"
            );
        }

        Ok(records)
    }

    fn format_aggregations(&self, raw: &JsonValue) -> Result<Map<String, JsonValue>> {
        let Some(aggregations) = raw.get("aggregations").and_then(|v| v.as_object()) else {
            return Ok(Map::new());
        };

        aggregations
            .iter()
            .map(|(name, aggregation)| {
                let formatted = self.formatters.format(name, aggregation)?;
                Ok((name.clone(), formatted))
            })
            .collect()
    }
}

/// `hits.total.value`, or a bare integer `hits.total`.
fn total_hits(raw: &JsonValue) -> Result<u64> {
    let total = raw.pointer("/hits/total");
    total
        .and_then(|t| t.get("value").or(Some(t)))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| Error::MalformedResponse("missing hits.total.value".to_string()))
}

fn hit_ids(raw: &JsonValue) -> Result<Vec<String>> {
    let hits = raw
        .pointer("/hits/hits")
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::MalformedResponse("missing hits.hits".to_string()))?;

    hits.iter()
        .map(|hit| {
            hit.get("_id")
                .and_then(|id| id.as_str())
                .map(|id| id.to_string())
                .ok_or_else(|| Error::MalformedResponse("search hit without _id".to_string()))
        })
        .collect()
}
