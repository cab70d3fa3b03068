//! Online/offline signal polled before each attempt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Synchronous connectivity probe.
///
/// The request loop polls this once at the start of every attempt; it never
/// subscribes to change events.
pub trait ConnectivitySignal: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Signal for environments without a connectivity source: always online.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeOnline;

impl ConnectivitySignal for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Shared boolean flag the embedding application flips from its own
/// connectivity events. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct SharedFlag {
    online: Arc<AtomicBool>,
}

impl SharedFlag {
    /// Create a flag with the given initial state.
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Record a connectivity change.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivitySignal for SharedFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
