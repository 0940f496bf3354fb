//! The reqwest-backed [`ApiClient`] implementation.

use carmarket_core::{CarmarketError, CarmarketResult};

use async_trait::async_trait;
use reqwest::Client;

use crate::result::{classify_response, SubmissionResult};
use crate::{ApiClient, Method};

/// HTTP client for the marketplace API.
///
/// Holds a single configurable base address; endpoints are joined onto it.
/// All requests carry a JSON body and expect a JSON (or empty) response.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client for the given base address
    /// (e.g. `https://api.example.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
    ) -> CarmarketResult<SubmissionResult> {
        let url = self.url(endpoint);
        tracing::debug!(%url, ?method, "sending request");

        let request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url).json(payload),
        };

        // A transport-level failure (DNS, refused connection, malformed
        // URL) is the only Err path; any response at all gets classified.
        let response = request
            .send()
            .await
            .map_err(|e| CarmarketError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| CarmarketError::Network(e.to_string()))?;

        let result = classify_response(status, &body_text);
        match &result {
            SubmissionResult::Success(_) => tracing::debug!(status, "request succeeded"),
            SubmissionResult::Failure { message, .. } => {
                tracing::warn!(status, ?message, "request rejected");
            }
        }
        Ok(result)
    }
}
