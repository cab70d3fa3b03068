//! Terminal-failure notifications and the bound retry affordance.
//!
//! Retriable errors never reach this module; the retry loop delivers only
//! terminal failures here, each paired with a [`RetryAction`] the
//! presentation layer can surface as an actionable control.

use crate::client::RequestClient;
use crate::error::{ClassifiedError, ErrorKind};
use crate::types::{RequestResult, RequestSpec};
use std::fmt;

/// Zero-argument retry command bound to the original request.
///
/// Invoking it re-runs the whole call from scratch — fresh attempt counter,
/// fresh cache check — not merely the last failed attempt. It is an explicit
/// value rather than a captured closure so it can be constructed, inspected,
/// and invoked independently of the client internals that produced it.
#[derive(Clone)]
pub struct RetryAction {
    client: RequestClient,
    spec: RequestSpec,
}

impl RetryAction {
    pub(crate) fn new(client: RequestClient, spec: RequestSpec) -> Self {
        Self { client, spec }
    }

    /// The request this action will re-run.
    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    /// Re-run the request and return its outcome.
    pub async fn run(&self) -> Result<RequestResult, ClassifiedError> {
        self.client.execute(&self.spec).await
    }

    /// Fire-and-forget retry on the current runtime; the outcome is dropped.
    pub fn dispatch(&self) {
        let action = self.clone();
        tokio::spawn(async move {
            let _ = action.run().await;
        });
    }
}

impl fmt::Debug for RetryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAction")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// User-facing notification for a terminal failure.
#[derive(Debug)]
pub struct Notification {
    pub kind: ErrorKind,
    /// Message from the classified error, ready to render.
    pub message: String,
    /// Label for the retry control, e.g. "Retry".
    pub action_label: String,
    /// Command that re-runs the failed request from scratch.
    pub retry: RetryAction,
}

/// Presentation channel for terminal failures.
///
/// Delivery is fire-and-forget: implementations must not panic back into the
/// request loop, and the loop never waits on them.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Reference sink that logs instead of rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        tracing::warn!(
            kind = %notification.kind,
            message = %notification.message,
            "request failed terminally"
        );
    }
}
