//! Wire dispatch for one attempt.

use crate::error::TransportError;
use crate::types::RequestSpec;
use async_trait::async_trait;

/// Raw outcome of one dispatched attempt, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Full response body as text; parse-mode interpretation happens later.
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One network dispatch.
///
/// Implementations must not apply their own retries or deadline; the request
/// loop owns both, so dropping the returned future cancels the attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, spec: &RequestSpec) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(&self, spec: &RequestSpec) -> Result<RawResponse, TransportError> {
        let mut req = self.http.request(spec.method.clone(), &spec.url);
        for (name, value) in &spec.headers {
            req = req.header(name, value);
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }
        let response = req.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}
