//! Aggregation formatters
//!
//! A domain builder registers one formatter per aggregation name it expects
//! back from the backend. Each formatter receives the raw aggregation body
//! (e.g. `{"buckets": [...]}`) and returns the summary handed to callers.

use crate::{Error, Result};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

/// Turns a raw aggregation body into a caller-facing summary.
pub type Formatter = Box<dyn Fn(&JsonValue) -> Result<JsonValue> + Send + Sync>;

/// Registry of formatters keyed by aggregation name.
#[derive(Default)]
pub struct AggregationFormatters {
    formatters: HashMap<String, Formatter>,
}

impl AggregationFormatters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `formatter` for aggregation `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F) -> &mut Self
    where
        F: Fn(&JsonValue) -> Result<JsonValue> + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Box::new(formatter));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Format one aggregation.
    ///
    /// # Errors
    /// * `UnformattedAggregation` - If nothing is registered under `name`
    pub fn format(&self, name: &str, aggregation: &JsonValue) -> Result<JsonValue> {
        let formatter = self
            .formatters
            .get(name)
            .ok_or_else(|| Error::UnformattedAggregation(name.to_string()))?;
        formatter(aggregation)
    }
}

impl fmt::Debug for AggregationFormatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.formatters.keys().collect();
        names.sort();
        f.debug_struct("AggregationFormatters")
            .field("names", &names)
            .finish()
    }
}

/// Sum of `doc_count` over a bucketed aggregation.
pub fn bucket_total(aggregation: &JsonValue) -> u64 {
    aggregation
        .get("buckets")
        .and_then(|b| b.as_array())
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|b| b.get("doc_count").and_then(|c| c.as_u64()))
                .sum()
        })
        .unwrap_or(0)
}
