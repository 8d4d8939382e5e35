//! Search request compilation.
//!
//! Renders accumulated clauses plus paging settings into a single backend
//! request:
//! - Boolean query built only from categories that hold clauses
//! - Top-level aggregation and script blocks when set
//! - Offset/limit pagination from a 1-based page number
//! - A fixed tiebreaker sort for stable paging

use serde_json::{Map, Value as JsonValue};
use sift_client::QueryRequest;

mod clauses;

pub use clauses::{ClauseCategory, ClauseStore, Clauses};

/// Sort key appended to every request so equal-score documents page
/// deterministically.
pub const TIEBREAKER_SORT: &str = "_doc";

/// Offset of the first hit on `page`. Pages are 1-based; page 0 or below
/// yields a negative offset which the backend rejects.
///
/// Saturates at the `i64` bounds, so out-of-range page numbers reach the
/// backend as an offset it refuses instead of overflowing here.
pub fn offset(page: i64, size: u32) -> i64 {
    page.saturating_sub(1).saturating_mul(i64::from(size))
}

/// Compile the store into a backend request.
///
/// Pure: the store is not touched, and identical inputs render identical
/// requests.
pub fn compile(
    store: &ClauseStore,
    index: &str,
    page: i64,
    size: u32,
    track_total_hits: bool,
) -> QueryRequest {
    let mut body = Map::new();

    let mut bool_query = Map::new();
    for category in ClauseCategory::BOOL {
        if let Some(rendered) = store.render(category) {
            bool_query.insert(category.as_str().to_string(), rendered);
        }
    }
    if !bool_query.is_empty() {
        let mut query = Map::new();
        query.insert("bool".to_string(), JsonValue::Object(bool_query));
        body.insert("query".to_string(), JsonValue::Object(query));
    }

    if let Some(aggs) = store.render(ClauseCategory::Aggregation) {
        body.insert(ClauseCategory::Aggregation.as_str().to_string(), aggs);
    }

    if let Some(script) = store.script() {
        body.insert("script".to_string(), script.clone());
    }

    // Ensure deterministic ordering for pagination.
    body.insert(
        "sort".to_string(),
        JsonValue::Array(vec![JsonValue::String(TIEBREAKER_SORT.to_string())]),
    );

    QueryRequest {
        index: index.to_string(),
        from: offset(page, size),
        size,
        track_total_hits,
        body: JsonValue::Object(body),
    }
}
