//! Shared test fixtures for the request-loop test modules.
//!
//! Keeping tiny but reusable fakes here prevents each test module from
//! rebuilding ad-hoc transport scripts and temp-dir code.

use crate::client::{RawResponse, Sleeper, Transport};
use crate::error::TransportError;
use crate::notify::{Notification, NotificationSink};
use crate::types::RequestSpec;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
///
/// Intentionally simple and std-only so unit tests can use it without
/// introducing new dependencies.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("sturdy-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// What a scripted transport does for one dispatch.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Answer with the given status and body.
    Respond { status: u16, body: String },
    /// Fail at the wire level before any status exists.
    Fail(String),
    /// Hang until the caller's deadline cancels the attempt.
    NeverResolve,
}

impl DispatchOutcome {
    pub fn respond(status: u16, body: String) -> Self {
        Self::Respond { status, body }
    }
}

/// Transport fake driven by a fixed script of outcomes.
///
/// Dispatches consume the script in order; once exhausted, the final outcome
/// repeats. Every dispatch is counted, resolved or not.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<Vec<DispatchOutcome>>,
    dispatches: AtomicUsize,
}

impl ScriptedTransport {
    pub fn script(outcomes: Vec<DispatchOutcome>) -> Self {
        assert!(!outcomes.is_empty(), "script needs at least one outcome");
        Self {
            script: Mutex::new(outcomes),
            dispatches: AtomicUsize::new(0),
        }
    }

    /// Script that repeats one outcome forever.
    pub fn always(outcome: DispatchOutcome) -> Self {
        Self::script(vec![outcome])
    }

    /// Number of dispatches observed so far, including canceled ones.
    pub fn dispatch_count(&self) -> usize {
        self.dispatches.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> DispatchOutcome {
        let mut script = self.script.lock().expect("script lock");
        if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn dispatch(&self, _spec: &RequestSpec) -> Result<RawResponse, TransportError> {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
        match self.next_outcome() {
            DispatchOutcome::Respond { status, body } => Ok(RawResponse { status, body }),
            DispatchOutcome::Fail(reason) => Err(TransportError::Other(reason)),
            DispatchOutcome::NeverResolve => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
        }
    }
}

/// Sleeper fake that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleep lock").clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("sleep lock").push(duration);
    }
}

/// Sink fake that stores delivered notifications for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications delivered so far.
    pub fn count(&self) -> usize {
        self.notifications.lock().expect("sink lock").len()
    }

    /// Remove and return the most recent notification.
    pub fn take_last(&self) -> Option<Notification> {
        self.notifications.lock().expect("sink lock").pop()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("sink lock")
            .push(notification);
    }
}
