//! In-memory search backend for testing without a running cluster.
//!
//! [`MemoryBackend`] keeps indices and documents in memory and evaluates a
//! small subset of the boolean query language:
//! - `term`, `terms`, `match` and `match_all` leaf clauses
//! - `must`/`filter` (all hold), `must_not` (none hold), `should` (one holds)
//! - `terms` and `value_count` aggregations
//!
//! Hits are returned in document id order, which stands in for `_doc`
//! ordering. Scripts are accepted and ignored. As on a real cluster,
//! `hits.total` is omitted when `track_total_hits` is false, and paging past
//! the default result window is rejected.

use crate::backend::SearchBackend;
use crate::error::{Error, Result};
use crate::models::{Acknowledged, IndexSettings, QueryRequest};
use async_trait::async_trait;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Default `index.max_result_window` of an Elasticsearch index.
pub const MAX_RESULT_WINDOW: i64 = 10_000;

#[derive(Debug, Clone)]
struct MemoryIndex {
    settings: IndexSettings,
    documents: BTreeMap<String, JsonValue>,
}

/// In-memory search backend.
///
/// Clones share the same state, so one backend can be handed to several
/// builders and inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    indices: Arc<RwLock<BTreeMap<String, MemoryIndex>>>,
    create_calls: Arc<AtomicUsize>,
    search_calls: Arc<AtomicUsize>,
    last_request: Arc<RwLock<Option<QueryRequest>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under `id`, replacing any previous version.
    pub async fn index_document(&self, index: &str, id: &str, document: JsonValue) -> Result<()> {
        let mut indices = self.indices.write().await;
        let entry = indices
            .get_mut(index)
            .ok_or_else(|| Error::IndexMissing(index.to_string()))?;
        entry.documents.insert(id.to_string(), document);
        Ok(())
    }

    pub async fn document_count(&self, index: &str) -> Option<usize> {
        self.indices
            .read()
            .await
            .get(index)
            .map(|i| i.documents.len())
    }

    pub async fn settings(&self, index: &str) -> Option<IndexSettings> {
        self.indices
            .read()
            .await
            .get(index)
            .map(|i| i.settings.clone())
    }

    /// Number of create-index calls received, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub async fn last_request(&self) -> Option<QueryRequest> {
        self.last_request.read().await.clone()
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: &QueryRequest) -> Result<JsonValue> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.write().await = Some(request.clone());

        if request.from < 0 {
            return Err(Error::Backend {
                status: 400,
                reason: "[from] parameter cannot be negative".to_string(),
            });
        }
        if request.from.saturating_add(i64::from(request.size)) > MAX_RESULT_WINDOW {
            return Err(Error::Backend {
                status: 400,
                reason: format!(
                    "Result window is too large, from + size must be less than or equal to: [{}]",
                    MAX_RESULT_WINDOW
                ),
            });
        }

        let indices = self.indices.read().await;
        let entry = indices
            .get(&request.index)
            .ok_or_else(|| Error::IndexMissing(request.index.clone()))?;

        let bool_query = request.body.pointer("/query/bool");
        let matched: Vec<(&String, &JsonValue)> = entry
            .documents
            .iter()
            .filter(|(_, doc)| bool_query.map_or(true, |q| matches_bool(q, doc)))
            .collect();

        let total = matched.len();
        let hits: Vec<JsonValue> = matched
            .iter()
            .skip(request.from as usize)
            .take(request.size as usize)
            .map(|(id, doc)| {
                json!({
                    "_index": request.index,
                    "_id": id,
                    "_score": null,
                    "_source": doc,
                })
            })
            .collect();

        debug!(index = %request.index, total, returned = hits.len(), "Memory search");

        let mut response = json!({
            "took": 0,
            "timed_out": false,
            "hits": {
                "max_score": null,
                "hits": hits,
            }
        });
        // Untracked searches carry no total at all.
        if request.track_total_hits {
            response["hits"]["total"] = json!({"value": total, "relation": "eq"});
        }

        if let Some(aggs) = request.body.get("aggs").and_then(|v| v.as_object()) {
            let docs: Vec<&JsonValue> = matched.iter().map(|(_, doc)| *doc).collect();
            let mut out = Map::new();
            for (name, definition) in aggs {
                out.insert(name.clone(), aggregate(name, definition, &docs)?);
            }
            response["aggregations"] = JsonValue::Object(out);
        }

        Ok(response)
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        Ok(self.indices.read().await.contains_key(index))
    }

    async fn create_index(&self, index: &str, settings: &IndexSettings) -> Result<Acknowledged> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut indices = self.indices.write().await;
        if indices.contains_key(index) {
            return Err(Error::IndexConflict(index.to_string()));
        }
        indices.insert(
            index.to_string(),
            MemoryIndex {
                settings: settings.clone(),
                documents: BTreeMap::new(),
            },
        );
        Ok(Acknowledged {
            acknowledged: true,
            index: Some(index.to_string()),
        })
    }

    async fn delete_index(&self, index: &str) -> Result<Acknowledged> {
        let mut indices = self.indices.write().await;
        if indices.remove(index).is_none() {
            return Err(Error::IndexMissing(index.to_string()));
        }
        Ok(Acknowledged {
            acknowledged: true,
            index: None,
        })
    }
}

fn clauses<'a>(bool_query: &'a JsonValue, name: &str) -> Vec<(&'a String, &'a JsonValue)> {
    bool_query
        .get(name)
        .and_then(|v| v.as_object())
        .map(|m| m.iter().collect())
        .unwrap_or_default()
}

fn matches_bool(bool_query: &JsonValue, doc: &JsonValue) -> bool {
    let must = clauses(bool_query, "must");
    let filter = clauses(bool_query, "filter");
    let must_not = clauses(bool_query, "must_not");
    let should = clauses(bool_query, "should");

    must.iter()
        .chain(filter.iter())
        .all(|(kind, body)| matches_clause(kind, body, doc))
        && !must_not
            .iter()
            .any(|(kind, body)| matches_clause(kind, body, doc))
        && (should.is_empty()
            || should
                .iter()
                .any(|(kind, body)| matches_clause(kind, body, doc)))
}

/// Unknown clause kinds match everything.
fn matches_clause(kind: &str, body: &JsonValue, doc: &JsonValue) -> bool {
    let Some((field, spec)) = body.as_object().and_then(|m| m.iter().next()) else {
        return kind == "match_all";
    };
    let value = doc.get(field);

    match kind {
        "term" => {
            let expected = spec.get("value").unwrap_or(spec);
            value.map_or(false, |v| field_contains(v, expected))
        }
        "terms" => spec.as_array().map_or(false, |candidates| {
            value.map_or(false, |v| candidates.iter().any(|c| field_contains(v, c)))
        }),
        "match" => {
            let (query, operator) = match spec {
                JsonValue::String(s) => (s.as_str(), "OR"),
                other => (
                    other.get("query").and_then(|q| q.as_str()).unwrap_or(""),
                    other
                        .get("operator")
                        .and_then(|o| o.as_str())
                        .unwrap_or("OR"),
                ),
            };
            let text = value
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_lowercase();
            let words: Vec<&str> = text.split_whitespace().collect();
            let mut terms = query.split_whitespace().map(|t| t.to_lowercase());
            if operator.eq_ignore_ascii_case("AND") {
                terms.all(|t| words.contains(&t.as_str()))
            } else {
                terms.any(|t| words.contains(&t.as_str()))
            }
        }
        _ => true,
    }
}

fn field_contains(value: &JsonValue, expected: &JsonValue) -> bool {
    match value {
        JsonValue::Array(items) => items.iter().any(|item| item == expected),
        other => other == expected,
    }
}

fn aggregate(name: &str, definition: &JsonValue, docs: &[&JsonValue]) -> Result<JsonValue> {
    if let Some(field) = definition.pointer("/terms/field").and_then(|f| f.as_str()) {
        let mut counts: BTreeMap<String, (JsonValue, u64)> = BTreeMap::new();
        for doc in docs {
            let values = match doc.get(field) {
                Some(JsonValue::Array(items)) => items.clone(),
                Some(JsonValue::Null) | None => Vec::new(),
                Some(other) => vec![other.clone()],
            };
            for value in values {
                let entry = counts.entry(value.to_string()).or_insert((value, 0));
                entry.1 += 1;
            }
        }

        let mut buckets: Vec<(JsonValue, u64)> = counts.into_values().collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1));
        let buckets: Vec<JsonValue> = buckets
            .into_iter()
            .map(|(key, doc_count)| json!({"key": key, "doc_count": doc_count}))
            .collect();
        return Ok(json!({"buckets": buckets}));
    }

    if let Some(field) = definition
        .pointer("/value_count/field")
        .and_then(|f| f.as_str())
    {
        let count = docs.iter().filter(|doc| doc.get(field).is_some()).count();
        return Ok(json!({"value": count}));
    }

    Err(Error::Backend {
        status: 400,
        reason: format!("unsupported aggregation [{}]", name),
    })
}
