//! # carmarket-api
//!
//! The network client for the carmarket API. The [`ApiClient`] trait is the
//! sole seam between the workflows and the transport: production code uses
//! [`HttpClient`] (reqwest), tests substitute an in-process double.
//!
//! A client makes at most one attempt per submit: no retry, no backoff, no
//! timeout configuration beyond the transport's own defaults. This matches
//! a one-shot UI action where the user re-invokes submit on failure.

pub mod client;
pub mod result;

use async_trait::async_trait;

use carmarket_core::CarmarketResult;

pub use client::HttpClient;
pub use result::{classify_response, SubmissionResult};

/// The HTTP method for a submission.
///
/// Both production endpoints use `POST`; the enum exists so the seam stays
/// honest about what is sent rather than hardcoding the verb in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

/// The boundary between form workflows and the network.
///
/// `send` returns `Err(CarmarketError::Network)` if and only if the
/// transport call itself fails (no connectivity, refused connection,
/// malformed URL). A response of any status is an `Ok` carrying a
/// classified [`SubmissionResult`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Serializes `payload`, issues a single HTTP request to `endpoint`
    /// (relative to the client's base address), and classifies the outcome.
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
    ) -> CarmarketResult<SubmissionResult>;
}
