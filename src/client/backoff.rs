//! Exponential backoff arithmetic.

use std::time::Duration;

/// Delay before retry attempt `attempt` (1-based): `base * 2^(attempt - 1)`.
///
/// Attempt 0 never waits, so callers must not ask for its delay. Pure and
/// deterministic — no jitter, no cap, and no sleeping here; the wall-clock
/// wait lives behind the `Sleeper` seam.
pub fn delay(base: Duration, attempt: u32) -> Duration {
    debug_assert!(attempt >= 1, "attempt 0 has no backoff delay");
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor)
}
