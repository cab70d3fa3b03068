//! Request descriptions, payloads, and the success result shape.
//!
//! A [`RequestSpec`] is the immutable description of one outbound call:
//! transport details (opaque to the resilience loop) plus behavioral knobs
//! for retries, backoff, deadlines, and caching. It is constructed fresh per
//! call and lives for that call only, except when a terminal failure binds a
//! clone of it into a retry action.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 3;
/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_DELAY_BASE: Duration = Duration::from_millis(1200);
/// Default per-attempt deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether the cache is consulted before or only as a fallback during
/// network attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStrategy {
    /// Return an existing cached record immediately, skipping the network.
    CacheFirst,
    /// Go to the network; the cache is only an offline fallback.
    #[default]
    NetworkFirst,
}

/// How a successful response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Json,
    Text,
}

/// Parsed response payload.
///
/// Serializable so cached payloads round-trip through persistence unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "snake_case")]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

/// Immutable description of one resilient outbound call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Target resource identifier, passed through to the transport.
    pub url: String,
    /// HTTP method, passed through to the transport.
    pub method: Method,
    /// Extra request headers, passed through to the transport.
    pub headers: Vec<(String, String)>,
    /// Optional JSON request body, passed through to the transport.
    pub body: Option<serde_json::Value>,
    /// Number of retries after the first attempt.
    pub retries: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_delay_base: Duration,
    /// Deadline applied to each individual attempt.
    pub timeout: Duration,
    /// Key under which a successful payload is cached, when set.
    pub cache_key: Option<String>,
    /// Cache participation for this call.
    pub cache_strategy: CacheStrategy,
    /// Interpretation of a successful response body.
    pub parse_mode: ParseMode,
    /// Diagnostic label used in log events.
    pub description: String,
    /// Advisory success message carried for callers; unused by the loop.
    pub success_message: Option<String>,
}

impl RequestSpec {
    /// Describe a call with the given method and target.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
            retries: DEFAULT_RETRIES,
            retry_delay_base: DEFAULT_RETRY_DELAY_BASE,
            timeout: DEFAULT_TIMEOUT,
            cache_key: None,
            cache_strategy: CacheStrategy::default(),
            parse_mode: ParseMode::default(),
            description: String::new(),
            success_message: None,
        }
    }

    /// Describe a GET call.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Describe a POST call.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON request body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the retry budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Override the backoff base delay.
    pub fn with_retry_delay_base(mut self, base: Duration) -> Self {
        self.retry_delay_base = base;
        self
    }

    /// Override the per-attempt deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache successful payloads under the given key.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Override the cache strategy.
    pub fn with_cache_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.cache_strategy = strategy;
        self
    }

    /// Override body interpretation.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Set the diagnostic label shown in log events.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Carry an advisory success message for the caller.
    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }
}

/// The only successful return shape of a resilient call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    /// Parsed payload.
    pub data: Body,
    /// HTTP status of the dispatch, or 200 for cache-served results.
    pub status: u16,
    /// True when served from the cache instead of a fresh dispatch.
    /// Informational only; it never changes the shape of `data`.
    pub from_cache: bool,
}

impl RequestResult {
    /// Result served from a cached record.
    pub(crate) fn cached(payload: Body) -> Self {
        Self {
            data: payload,
            status: 200,
            from_cache: true,
        }
    }

    /// Result from a fresh successful dispatch.
    pub(crate) fn fresh(data: Body, status: u16) -> Self {
        Self {
            data,
            status,
            from_cache: false,
        }
    }
}
