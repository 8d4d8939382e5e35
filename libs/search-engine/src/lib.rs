//! Sift - boolean query builder for full-text search backends
//!
//! Builds Elasticsearch-style boolean queries from fluent clause mutators and
//! turns each response into one page of resolved records:
//! - Index bootstrap on first use, with per-entity mappings
//! - Deterministic request rendering with a stable tiebreaker sort
//! - Length-aware pagination links
//! - Named aggregation formatters
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use serde_json::json;
//! use sift::{finder, BuilderRegistry, SearchContext, Searchable, StaticPageResolver};
//! use sift_client::MemoryBackend;
//! use std::sync::Arc;
//!
//! struct Posts;
//!
//! #[async_trait]
//! impl Searchable for Posts {
//!     type Record = String;
//!
//!     fn table(&self) -> &str {
//!         "posts"
//!     }
//!
//!     fn record_key(record: &String) -> String {
//!         record.clone()
//!     }
//!
//!     async fn find_by_ids(&self, ids: &[String]) -> sift::Result<Vec<String>> {
//!         Ok(ids.to_vec())
//!     }
//! }
//!
//! # async fn example() -> sift::Result<()> {
//! let ctx = SearchContext::new(
//!     Arc::new(MemoryBackend::new()),
//!     BuilderRegistry::new(),
//!     Arc::new(StaticPageResolver::default()),
//! );
//!
//! let page = finder(&ctx, Posts)
//!     .await?
//!     .set_must_query("term", json!({"status": "open"}))
//!     .paginate()
//!     .await?;
//!
//! println!("{} hits", page.total_hits());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod finder;
pub mod formatters;
pub mod index;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod query;
pub mod registry;
pub mod results;

pub use builder::{normalize_query, DefaultBuilder, DomainBuilder};
pub use config::{LoggingConfig, PaginationConfig, SiftConfig};
pub use engine::SearchEngine;
pub use error::{Error, Result};
pub use finder::{finder, SearchContext};
pub use formatters::AggregationFormatters;
pub use index::IndexManager;
pub use model::Searchable;
pub use pagination::{PageLink, PageLinks, PageResolver, StaticPageResolver};
pub use query::{ClauseCategory, ClauseStore};
pub use registry::BuilderRegistry;
pub use results::PageResult;
