//! HTTP client for Elasticsearch-compatible services

use crate::backend::SearchBackend;
use crate::error::{Error, Result};
use crate::models::{Acknowledged, ClientConfig, IndexSettings, QueryRequest};
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Client for a search cluster reachable over HTTP.
pub struct ElasticClient {
    client: Client,
    hosts: Vec<String>,
    retries: u32,
}

impl ElasticClient {
    /// Create a client from connection settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            hosts: config
                .hosts
                .iter()
                .map(|h| h.trim_end_matches('/').to_string())
                .collect(),
            retries: config.retries,
        })
    }

    /// Create a client for a single host with the default retry budget.
    pub fn with_host(host: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig {
            hosts: vec![host.into()],
            ..ClientConfig::default()
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Send a request, moving to the next host on transport failure.
    ///
    /// Status errors are returned to the caller as-is; only failures to get
    /// any response consume the retry budget.
    async fn send(&self, method: Method, path: &str, body: Option<&JsonValue>) -> Result<Response> {
        if self.hosts.is_empty() {
            return Err(Error::BackendUnavailable {
                attempts: 0,
                reason: "no hosts configured".to_string(),
            });
        }

        let attempts = self.retries + 1;
        let mut last_error = String::new();
        for attempt in 0..attempts {
            let host = &self.hosts[attempt as usize % self.hosts.len()];
            let url = format!("{}{}", host, path);
            tracing::debug!(method = %method, url = %url, attempt, "Sending search backend request");

            let mut request = self.client.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(url = %url, attempt, error = %e, "Search backend request failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(Error::BackendUnavailable {
            attempts,
            reason: last_error,
        })
    }
}

fn index_path(index: &str) -> String {
    format!("/{}", urlencoding::encode(index))
}

/// Map a non-success response onto the error taxonomy.
async fn status_error(index: &str, response: Response) -> Error {
    let status = response.status();
    let body: JsonValue = response.json().await.unwrap_or(JsonValue::Null);
    let error_type = body
        .pointer("/error/type")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    match (status, error_type) {
        (_, "index_not_found_exception") | (StatusCode::NOT_FOUND, _) => {
            Error::IndexMissing(index.to_string())
        }
        (_, "resource_already_exists_exception") => Error::IndexConflict(index.to_string()),
        _ => {
            let reason = body
                .pointer("/error/reason")
                .and_then(|v| v.as_str())
                .or_else(|| body.get("error").and_then(|v| v.as_str()))
                .unwrap_or(error_type);
            Error::Backend {
                status: status.as_u16(),
                reason: if reason.is_empty() {
                    status.to_string()
                } else {
                    reason.to_string()
                },
            }
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn search(&self, request: &QueryRequest) -> Result<JsonValue> {
        let path = format!("{}/_search", index_path(&request.index));
        let body = request.to_body();
        let response = self.send(Method::POST, &path, Some(&body)).await?;

        if !response.status().is_success() {
            return Err(status_error(&request.index, response).await);
        }

        Ok(response.json().await?)
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self.send(Method::HEAD, &index_path(index), None).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(status_error(index, response).await),
        }
    }

    async fn create_index(&self, index: &str, settings: &IndexSettings) -> Result<Acknowledged> {
        let body = settings.to_body();
        let response = self.send(Method::PUT, &index_path(index), Some(&body)).await?;

        if !response.status().is_success() {
            // A 404 on create only happens behind odd proxies; keep it as a status error.
            let status = response.status();
            return Err(match status_error(index, response).await {
                Error::IndexMissing(_) => Error::Backend {
                    status: status.as_u16(),
                    reason: status.to_string(),
                },
                other => other,
            });
        }

        Ok(response.json().await?)
    }

    async fn delete_index(&self, index: &str) -> Result<Acknowledged> {
        let response = self.send(Method::DELETE, &index_path(index), None).await?;

        if !response.status().is_success() {
            return Err(status_error(index, response).await);
        }

        Ok(response.json().await?)
    }
}
