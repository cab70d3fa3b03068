//! Injectable wall-clock suspension for backoff waits.

use async_trait::async_trait;
use std::time::Duration;

/// Cooperative sleep seam.
///
/// Tests substitute a recording implementation so the full retry sequence
/// runs without real wall-clock waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
