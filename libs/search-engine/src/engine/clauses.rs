use super::SearchEngine;
use crate::model::Searchable;
use crate::query::ClauseCategory;
use serde_json::Value as JsonValue;

impl<M: Searchable> SearchEngine<M> {
    /// Target a different index than the one resolved from the model.
    ///
    /// The replacement index is not bootstrapped.
    pub fn set_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn set_must_query(self, key: impl Into<String>, body: JsonValue) -> Self {
        self.set_clause(ClauseCategory::Must, key, body)
    }

    pub fn set_should_query(self, key: impl Into<String>, body: JsonValue) -> Self {
        self.set_clause(ClauseCategory::Should, key, body)
    }

    pub fn set_must_not_query(self, key: impl Into<String>, body: JsonValue) -> Self {
        self.set_clause(ClauseCategory::MustNot, key, body)
    }

    pub fn set_filter(self, key: impl Into<String>, body: JsonValue) -> Self {
        self.set_clause(ClauseCategory::Filter, key, body)
    }

    pub fn set_aggregation(self, key: impl Into<String>, body: JsonValue) -> Self {
        self.set_clause(ClauseCategory::Aggregation, key, body)
    }

    /// Only one script is active at a time; a second call replaces the first.
    pub fn set_script(mut self, body: JsonValue) -> Self {
        self.clauses.set_script(body);
        self
    }

    pub fn set_clause(
        mut self,
        category: ClauseCategory,
        key: impl Into<String>,
        body: JsonValue,
    ) -> Self {
        self.clauses.set_clause(category, key, body);
        self
    }

    /// Ask the backend to count every hit (the default) or skip counting.
    ///
    /// An untracked response carries no `hits.total`, and `paginate` needs
    /// one for the links, so it fails with `MalformedResponse`. Only `compile`
    /// is meaningful with tracking off.
    pub fn track_total_hits(mut self, track: bool) -> Self {
        self.track_total_hits = track;
        self
    }

    /// Free-text match, shaped and normalized by the domain builder.
    pub fn match_query(self, query: &str) -> Self {
        let (key, body) = self.domain.match_clause(query);
        self.set_must_query(key, body)
    }
}
