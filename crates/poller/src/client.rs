//! Status client: one GET against the homework status API per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use herald_common::config::AppConfig;
use herald_common::error::StatusClientError;
use herald_common::types::FROM_DATE_PARAM;

/// Source of raw status responses for a query window starting at `cursor`.
///
/// Implementations make exactly one attempt; retrying is the poll loop's job.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, cursor: i64) -> Result<Value, StatusClientError>;
}

/// HTTP client for the homework status endpoint.
pub struct StatusClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl StatusClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client for status API");
                reqwest::Client::new()
            });

        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.practicum_token.clone(),
            config.http_timeout,
        )
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, StatusClientError> {
        tracing::debug!(endpoint = %self.endpoint, cursor, "Querying status API");

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .query(&[(FROM_DATE_PARAM, cursor)])
            .send()
            .await
            .map_err(|e| StatusClientError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StatusClientError::UnexpectedStatus(status.as_u16()));
        }

        // A body that is not JSON is a broken transport, not a shape violation.
        response
            .json::<Value>()
            .await
            .map_err(|e| StatusClientError::TransportFailure(e.to_string()))
    }
}
