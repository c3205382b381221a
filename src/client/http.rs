//! # HTTP Backend Abstraction
//!
//! Trait-based HTTP backend for the persistence-API clients, allowing
//! dependency injection and fake-backend testing. The production
//! implementation uses reqwest over rustls against the configured base URL.

use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// A raw backend response: status code plus body text.
///
/// Body interpretation (JSON entity, entity list, diagnostic text, or the
/// 204 absence signal) is the resource client's job, not the transport's.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }
}

/// Trait for HTTP backends executing requests against the persistence API.
///
/// Production code uses [`ReqwestBackend`]; tests inject a recording fake.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Execute one request. `path` is relative to the backend base URL.
    /// Transport-level failures return [`GatewayError::Transport`]; any
    /// response that arrived, whatever its status, is an `Ok(RawResponse)`.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<RawResponse>;
}

/// Production HTTP backend using reqwest
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestBackend {
    /// Create a backend against the given base URL with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> GatewayResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            GatewayError::configuration("backend", format!("invalid base URL {base_url}: {e}"))
        })?;

        // Url::join treats a path without a trailing slash as a file and
        // would drop its last segment
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::configuration("backend", e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            GatewayError::configuration("backend", format!("invalid request path {path}: {e}"))
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<RawResponse> {
        let url = self.endpoint(path)?;

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
