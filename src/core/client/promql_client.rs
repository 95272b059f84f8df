use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::core::client::metrics_source_trait::MetricsSource;
use crate::domain::promql::model::{PromQlParams, PromQlResponse};

/// Failures talking to the metrics backend; surfaced to HTTP callers as 502.
#[derive(Debug, Error)]
pub enum PromQlClientError {
    #[error("Failed to call metrics backend (url={url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Metrics backend returned {status}: {body} (url={url})")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode metrics backend response (url={url}): {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// `query_range` client for a Prometheus-compatible performance manager.
#[derive(Debug, Clone)]
pub struct PromQlClient {
    http: Client,
    base_url: String,
}

impl PromQlClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn query_range_url(&self) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.ends_with("/query_range") {
            trimmed.to_string()
        } else {
            format!("{}/query_range", trimmed)
        }
    }
}

#[async_trait]
impl MetricsSource for PromQlClient {
    async fn query_range(&self, params: &PromQlParams) -> Result<PromQlResponse> {
        let url = self.query_range_url();
        let body = params.to_query_string();
        debug!(%url, start = %params.start, end = %params.end, step = %params.step, "query_range");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|source| PromQlClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PromQlClientError::Status { url, status, body }.into());
        }

        let response = resp
            .json::<PromQlResponse>()
            .await
            .map_err(|source| PromQlClientError::Decode { url, source })?;
        Ok(response)
    }
}
