//! Search engine - the builder every query starts from
//!
//! The SearchEngine is responsible for:
//! - Bootstrapping the model's index on construction
//! - Accumulating clauses through fluent mutators
//! - Compiling and executing exactly one search on `paginate`
//! - Handing the raw response to the result materializer

use crate::builder::DomainBuilder;
use crate::formatters::AggregationFormatters;
use crate::index::IndexManager;
use crate::model::Searchable;
use crate::pagination::PageResolver;
use crate::query::ClauseStore;
use sift_client::SearchBackend;
use std::sync::Arc;

mod api;
mod clauses;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameter that carries the page number.
pub const DEFAULT_PAGE_NAME: &str = "page";

/// Query builder bound to one searchable model.
///
/// A builder serves a single logical query: mutators consume and return it,
/// and `paginate` consumes it for good. Obtain a fresh builder for the next
/// query.
pub struct SearchEngine<M: Searchable> {
    backend: Arc<dyn SearchBackend>,
    indices: IndexManager,
    model: M,
    domain: Arc<dyn DomainBuilder>,
    formatters: AggregationFormatters,
    pages: Arc<dyn PageResolver>,
    index: String,
    clauses: ClauseStore,
    size: u32,
    page: i64,
    page_name: String,
    track_total_hits: bool,
}
