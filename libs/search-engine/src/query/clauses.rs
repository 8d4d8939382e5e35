//! Clause accumulation for boolean queries.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Keyed clause bodies within one category.
pub type Clauses = BTreeMap<String, JsonValue>;

/// Category a clause is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseCategory {
    Must,
    Should,
    MustNot,
    Filter,
    Aggregation,
}

impl ClauseCategory {
    /// Boolean query categories in render order.
    pub const BOOL: [ClauseCategory; 4] = [
        ClauseCategory::Must,
        ClauseCategory::Should,
        ClauseCategory::MustNot,
        ClauseCategory::Filter,
    ];

    /// Key used in the rendered request.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseCategory::Must => "must",
            ClauseCategory::Should => "should",
            ClauseCategory::MustNot => "must_not",
            ClauseCategory::Filter => "filter",
            ClauseCategory::Aggregation => "aggs",
        }
    }
}

/// Clause collections for a single query.
///
/// A category stays `None` until its first write, so "never set" and "set"
/// are distinguishable when rendering. There is no removal; start a new
/// store for a new query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseStore {
    must: Option<Clauses>,
    should: Option<Clauses>,
    must_not: Option<Clauses>,
    filter: Option<Clauses>,
    aggregations: Option<Clauses>,
    script: Option<JsonValue>,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `body` under `key`. The body is not validated.
    pub fn set_clause(&mut self, category: ClauseCategory, key: impl Into<String>, body: JsonValue) {
        self.slot_mut(category)
            .get_or_insert_with(Clauses::new)
            .insert(key.into(), body);
    }

    /// Replace the script. Last write wins.
    pub fn set_script(&mut self, body: JsonValue) {
        self.script = Some(body);
    }

    pub fn get(&self, category: ClauseCategory) -> Option<&Clauses> {
        match category {
            ClauseCategory::Must => self.must.as_ref(),
            ClauseCategory::Should => self.should.as_ref(),
            ClauseCategory::MustNot => self.must_not.as_ref(),
            ClauseCategory::Filter => self.filter.as_ref(),
            ClauseCategory::Aggregation => self.aggregations.as_ref(),
        }
    }

    pub fn script(&self) -> Option<&JsonValue> {
        self.script.as_ref()
    }

    /// True when no clause of any category and no script has been set.
    pub fn is_empty(&self) -> bool {
        self.script.is_none()
            && ClauseCategory::BOOL
                .iter()
                .chain(std::iter::once(&ClauseCategory::Aggregation))
                .all(|c| self.get(*c).map_or(true, |m| m.is_empty()))
    }

    /// Render a category as a JSON object, or `None` if it holds nothing.
    pub(crate) fn render(&self, category: ClauseCategory) -> Option<JsonValue> {
        let clauses = self.get(category)?;
        if clauses.is_empty() {
            return None;
        }
        let object: Map<String, JsonValue> = clauses
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Some(JsonValue::Object(object))
    }

    fn slot_mut(&mut self, category: ClauseCategory) -> &mut Option<Clauses> {
        match category {
            ClauseCategory::Must => &mut self.must,
            ClauseCategory::Should => &mut self.should,
            ClauseCategory::MustNot => &mut self.must_not,
            ClauseCategory::Filter => &mut self.filter,
            ClauseCategory::Aggregation => &mut self.aggregations,
        }
    }
}
