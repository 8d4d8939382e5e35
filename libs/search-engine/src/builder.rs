//! Per-entity builder specialization
//!
//! A [`DomainBuilder`] declares how an entity's index is created, which
//! aggregations it knows how to summarize, and how its free-text `match`
//! helper shapes the clause. Extra entity-specific query helpers belong in an
//! extension trait implemented for `SearchEngine<ThatModel>`.

use crate::formatters::AggregationFormatters;
use serde_json::{json, Value as JsonValue};
use sift_client::IndexSettings;

/// Entity-specific behavior plugged into a [`crate::SearchEngine`].
pub trait DomainBuilder: Send + Sync {
    /// Settings used when the index has to be created.
    fn mappings(&self, index: &str) -> IndexSettings;

    /// Register a formatter for every aggregation this builder issues.
    fn register_formatters(&self, _formatters: &mut AggregationFormatters) {}

    /// Key and body of the must clause written by `match_query`.
    ///
    /// The default normalizes the input with [`normalize_query`] and matches
    /// all terms against the `message` field.
    fn match_clause(&self, query: &str) -> (String, JsonValue) {
        (
            "match".to_string(),
            json!({
                "message": {
                    "query": normalize_query(query),
                    "operator": "AND"
                }
            }),
        )
    }
}

/// Generic builder used when an entity has no specialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBuilder;

impl DomainBuilder for DefaultBuilder {
    fn mappings(&self, _index: &str) -> IndexSettings {
        IndexSettings::new(1, 0)
    }
}

/// Trim, collapse runs of whitespace to one space, and lowercase.
///
/// Every run becomes a single ASCII space, whatever characters it held, so
/// `"a\t\nb"` normalizes to `"a b"` rather than keeping the run's last
/// character.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
