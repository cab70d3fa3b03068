//! Resilient request orchestration.
//!
//! The client facade here intentionally remains small:
//! - error classification is delegated to `classify`.
//! - backoff arithmetic is delegated to `backoff`.
//! - wire dispatch is delegated to `transport`.
//! - wall-clock waits are delegated to `sleep`.

pub mod backoff;
pub mod classify;
mod sleep;
mod transport;

pub use sleep::{Sleeper, TokioSleeper};
pub use transport::{HttpTransport, RawResponse, Transport};

use crate::cache::{CacheRecord, ResponseCache};
use crate::connectivity::ConnectivitySignal;
use crate::error::ClassifiedError;
use crate::notify::{Notification, NotificationSink, RetryAction};
use crate::types::{Body, CacheStrategy, ParseMode, RequestResult, RequestSpec};
use std::sync::Arc;
use tokio::time::timeout;

/// Label shown on a notification's retry control.
const RETRY_ACTION_LABEL: &str = "Retry";

/// Orchestrates resilient outbound requests: bounded retries with
/// exponential backoff, a per-attempt deadline, connectivity-aware cache
/// fallback, and terminal-error delivery to the notification sink.
///
/// Cheap to clone; clones share the same collaborators, like
/// `reqwest::Client`.
#[derive(Clone)]
pub struct RequestClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    connectivity: Arc<dyn ConnectivitySignal>,
    cache: Arc<dyn ResponseCache>,
    notifier: Arc<dyn NotificationSink>,
    sleeper: Arc<dyn Sleeper>,
}

impl RequestClient {
    /// Production wiring: HTTP transport and the tokio timer.
    pub fn new(
        connectivity: Arc<dyn ConnectivitySignal>,
        cache: Arc<dyn ResponseCache>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_parts(
            Arc::new(HttpTransport::new()),
            connectivity,
            cache,
            notifier,
            Arc::new(TokioSleeper),
        )
    }

    /// Fully injected construction; tests substitute every seam through this.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        connectivity: Arc<dyn ConnectivitySignal>,
        cache: Arc<dyn ResponseCache>,
        notifier: Arc<dyn NotificationSink>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                connectivity,
                cache,
                notifier,
                sleeper,
            }),
        }
    }

    /// Run one resilient call to completion.
    ///
    /// Returns the parsed payload on success. A terminal failure is both
    /// returned to the caller and delivered to the notification sink with a
    /// retry action bound to `spec` — dual delivery so callers can render
    /// inline state while the user still sees an actionable notification.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<RequestResult, ClassifiedError> {
        if spec.cache_strategy == CacheStrategy::CacheFirst {
            if let Some(record) = self.cached_record(spec) {
                tracing::debug!(description = %spec.description, "serving cache-first hit");
                return Ok(RequestResult::cached(record.payload));
            }
        }

        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                let wait = backoff::delay(spec.retry_delay_base, attempt);
                tracing::debug!(
                    description = %spec.description,
                    attempt,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "backing off before retry"
                );
                self.inner.sleeper.sleep(wait).await;
            }

            let err = match self.attempt_once(spec).await {
                Ok(result) => return Ok(result),
                Err(err) => err,
            };

            if err.retriable && attempt < spec.retries {
                attempt += 1;
                continue;
            }

            tracing::warn!(
                description = %spec.description,
                kind = %err.kind,
                status = err.status_code,
                "request failed terminally"
            );
            self.notify_terminal(spec, &err);
            return Err(err);
        }
    }

    /// One attempt: offline preflight, dispatch under deadline, parse, cache.
    async fn attempt_once(&self, spec: &RequestSpec) -> Result<RequestResult, ClassifiedError> {
        if !self.inner.connectivity.is_online() {
            // Definitively offline: a cached payload beats waiting out
            // retries that cannot reach the network anyway.
            if let Some(record) = self.cached_record(spec) {
                tracing::debug!(description = %spec.description, "offline, serving cached fallback");
                return Ok(RequestResult::cached(record.payload));
            }
            return Err(classify::offline_error());
        }

        let raw = match timeout(spec.timeout, self.inner.transport.dispatch(spec)).await {
            // Deadline fired; dropping the dispatch future cancels the call.
            Err(_elapsed) => return Err(classify::timeout_error(spec.timeout)),
            Ok(Err(err)) => return Err(classify::transport_error(&err)),
            Ok(Ok(raw)) => raw,
        };

        if !raw.is_success() {
            return Err(classify::status_error(raw.status, raw.body));
        }

        let data = parse_body(spec.parse_mode, raw.body)?;
        if let Some(key) = &spec.cache_key {
            self.inner.cache.set(key, data.clone());
        }
        Ok(RequestResult::fresh(data, raw.status))
    }

    /// Look up the cached record named by the spec, if any.
    fn cached_record(&self, spec: &RequestSpec) -> Option<CacheRecord> {
        let key = spec.cache_key.as_deref()?;
        self.inner.cache.get(key)
    }

    /// Deliver a terminal error to the sink with a bound retry action.
    fn notify_terminal(&self, spec: &RequestSpec, err: &ClassifiedError) {
        let retry = RetryAction::new(self.clone(), spec.clone());
        self.inner.notifier.notify(Notification {
            kind: err.kind,
            message: err.message.clone(),
            action_label: RETRY_ACTION_LABEL.to_string(),
            retry,
        });
    }
}

/// Interpret a successful body per the spec's parse mode.
fn parse_body(mode: ParseMode, body: String) -> Result<Body, ClassifiedError> {
    match mode {
        ParseMode::Json => serde_json::from_str(&body)
            .map(Body::Json)
            .map_err(|e| classify::parse_error(&e)),
        ParseMode::Text => Ok(Body::Text(body)),
    }
}
