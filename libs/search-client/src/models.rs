//! Wire models for the search backend

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// A single `_search` request.
///
/// `body` carries the `query`, `aggs`, `script` and `sort` blocks; the paging
/// fields are kept separate so callers can inspect them without digging
/// through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub index: String,
    pub from: i64,
    pub size: u32,
    pub track_total_hits: bool,
    pub body: JsonValue,
}

impl QueryRequest {
    /// Full request body as sent to `POST /{index}/_search`.
    pub fn to_body(&self) -> JsonValue {
        let mut out = Map::new();
        out.insert("from".to_string(), json!(self.from));
        out.insert("size".to_string(), json!(self.size));
        out.insert("track_total_hits".to_string(), json!(self.track_total_hits));
        if let Some(body) = self.body.as_object() {
            for (key, value) in body {
                out.insert(key.clone(), value.clone());
            }
        }
        JsonValue::Object(out)
    }
}

/// Index creation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<JsonValue>,
}

impl IndexSettings {
    pub fn new(number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            number_of_shards,
            number_of_replicas,
            mappings: None,
        }
    }

    pub fn with_mappings(mut self, mappings: JsonValue) -> Self {
        self.mappings = Some(mappings);
        self
    }

    /// Body for `PUT /{index}`.
    pub fn to_body(&self) -> JsonValue {
        let mut body = json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas,
            }
        });
        if let Some(mappings) = &self.mappings {
            body["mappings"] = mappings.clone();
        }
        body
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Acknowledgement returned by index create/delete calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Connection settings for [`crate::ElasticClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URLs tried in order; transport failures move on to the next host.
    pub hosts: Vec<String>,
    /// Extra attempts after the first transport failure.
    pub retries: u32,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["http://localhost:9200".to_string()],
            retries: 2,
            timeout_seconds: 30,
        }
    }
}
