//! Shared fixtures for the integration tests: a `Post` model backed by an
//! in-memory record store, a specialized builder for it, and a canned-response
//! backend for exercising the materializer against hand-written responses.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use sift::{
    AggregationFormatters, BuilderRegistry, DomainBuilder, PageResolver, SearchContext,
    SearchEngine, Searchable, StaticPageResolver,
};
use sift_client::{Acknowledged, IndexSettings, MemoryBackend, QueryRequest, SearchBackend};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const POSTS: &str = "posts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub status: String,
}

impl Post {
    pub fn new(id: &str, title: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
        }
    }

    pub fn document(&self) -> JsonValue {
        json!({"message": self.title, "status": self.status})
    }
}

/// Record store for posts. Returns lookups in reverse id order so callers
/// cannot rely on it matching hit order.
#[derive(Clone, Default)]
pub struct Posts {
    records: Arc<Mutex<Vec<Post>>>,
    lookups: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
}

impl Posts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            records: Arc::new(Mutex::new(posts)),
            ..Self::default()
        }
    }

    /// Make every later lookup fail as if the record store were down.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn forget(&self, id: &str) {
        self.records.lock().unwrap().retain(|p| p.id != id);
    }
}

#[async_trait]
impl Searchable for Posts {
    type Record = Post;

    fn table(&self) -> &str {
        POSTS
    }

    fn record_key(record: &Post) -> String {
        record.id.clone()
    }

    async fn find_by_ids(&self, ids: &[String]) -> sift::Result<Vec<Post>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(sift::Error::Lookup("post store unavailable".to_string()));
        }
        let records = self.records.lock().unwrap();
        let mut found: Vec<Post> = records
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }
}

/// Builder for posts: two shards, a keyword status field, and a formatter for
/// the `status` aggregation that flattens buckets into `{key: count}`.
pub struct PostBuilder;

impl DomainBuilder for PostBuilder {
    fn mappings(&self, _index: &str) -> IndexSettings {
        IndexSettings::new(2, 0).with_mappings(json!({
            "properties": {
                "message": {"type": "text"},
                "status": {"type": "keyword"}
            }
        }))
    }

    fn register_formatters(&self, formatters: &mut AggregationFormatters) {
        formatters.register("status", format_status);
    }
}

pub fn format_status(aggregation: &JsonValue) -> sift::Result<JsonValue> {
    let mut summary = serde_json::Map::new();
    for bucket in aggregation["buckets"].as_array().into_iter().flatten() {
        let key = bucket["key"].as_str().unwrap_or_default().to_string();
        let count = bucket
            .get("doc_count")
            .or_else(|| bucket.get("count"))
            .cloned()
            .unwrap_or(JsonValue::Null);
        summary.insert(key, count);
    }
    Ok(JsonValue::Object(summary))
}

/// Entity-specific helpers live on an extension trait.
pub trait PostQueries {
    fn with_status(self, status: &str) -> Self;
}

impl PostQueries for SearchEngine<Posts> {
    fn with_status(self, status: &str) -> Self {
        self.set_filter("term", json!({"status": status}))
    }
}

pub fn sample_posts(count: usize) -> Vec<Post> {
    (1..=count)
        .map(|i| {
            let status = if i % 3 == 0 { "closed" } else { "open" };
            Post::new(&format!("p{:02}", i), &format!("Post number {}", i), status)
        })
        .collect()
}

pub fn registry() -> BuilderRegistry {
    let mut registry = BuilderRegistry::new();
    registry.register_builder::<Posts, _>(PostBuilder);
    registry
}

pub fn context(backend: &MemoryBackend, page: i64, path: &str) -> SearchContext {
    context_with(Arc::new(backend.clone()), page, path)
}

pub fn context_with(backend: Arc<dyn SearchBackend>, page: i64, path: &str) -> SearchContext {
    let pages: Arc<dyn PageResolver> = Arc::new(StaticPageResolver::new(page, path));
    SearchContext::new(backend, registry(), pages)
}

/// Memory backend with the posts index created and `posts` indexed.
pub async fn seeded_backend(posts: &[Post]) -> anyhow::Result<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend
        .create_index(POSTS, &PostBuilder.mappings(POSTS))
        .await?;
    for post in posts {
        backend
            .index_document(POSTS, &post.id, post.document())
            .await?;
    }
    Ok(backend)
}

/// Backend whose searches all return one canned response.
#[derive(Clone)]
pub struct CannedBackend {
    response: JsonValue,
    searches: Arc<AtomicUsize>,
}

impl CannedBackend {
    pub fn new(response: JsonValue) -> Self {
        Self {
            response,
            searches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for CannedBackend {
    async fn search(&self, _request: &QueryRequest) -> sift_client::Result<JsonValue> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }

    async fn index_exists(&self, _index: &str) -> sift_client::Result<bool> {
        Ok(true)
    }

    async fn create_index(
        &self,
        index: &str,
        _settings: &IndexSettings,
    ) -> sift_client::Result<Acknowledged> {
        Ok(Acknowledged {
            acknowledged: true,
            index: Some(index.to_string()),
        })
    }

    async fn delete_index(&self, _index: &str) -> sift_client::Result<Acknowledged> {
        Ok(Acknowledged {
            acknowledged: true,
            index: None,
        })
    }
}

/// Memory backend that always reports its indices as absent, so every
/// bootstrap goes on to create an index another builder already made.
#[derive(Clone)]
pub struct StaleExistsBackend(pub MemoryBackend);

#[async_trait]
impl SearchBackend for StaleExistsBackend {
    async fn search(&self, request: &QueryRequest) -> sift_client::Result<JsonValue> {
        self.0.search(request).await
    }

    async fn index_exists(&self, _index: &str) -> sift_client::Result<bool> {
        Ok(false)
    }

    async fn create_index(
        &self,
        index: &str,
        settings: &IndexSettings,
    ) -> sift_client::Result<Acknowledged> {
        self.0.create_index(index, settings).await
    }

    async fn delete_index(&self, index: &str) -> sift_client::Result<Acknowledged> {
        self.0.delete_index(index).await
    }
}

/// Backend whose indices exist but whose searches never reach a host.
#[derive(Clone, Copy)]
pub struct UnreachableBackend;

impl UnreachableBackend {
    fn unavailable() -> sift_client::Error {
        sift_client::Error::BackendUnavailable {
            attempts: 3,
            reason: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl SearchBackend for UnreachableBackend {
    async fn search(&self, _request: &QueryRequest) -> sift_client::Result<JsonValue> {
        Err(Self::unavailable())
    }

    async fn index_exists(&self, _index: &str) -> sift_client::Result<bool> {
        Ok(true)
    }

    async fn create_index(
        &self,
        _index: &str,
        _settings: &IndexSettings,
    ) -> sift_client::Result<Acknowledged> {
        Err(Self::unavailable())
    }

    async fn delete_index(&self, _index: &str) -> sift_client::Result<Acknowledged> {
        Err(Self::unavailable())
    }
}
