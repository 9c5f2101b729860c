//! Tick broadcaster abstraction
//!
//! The broadcaster fires the registered handlers synchronously once per
//! simulation step, potentially from a thread distinct from the one that
//! registered them. Registration returns an explicit cancellable handle so
//! that unsubscription does not rely on handler-side flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::Timestamp;

/// Tick handler type
///
/// Invoked with the tick's timestamp. Handlers must not block the invoking
/// thread for long.
pub type TickHandler = Arc<dyn Fn(Timestamp) + Send + Sync>;

/// Cancellable handle to a registered tick handler
///
/// Broadcasters share the inner flag with the handle and must skip (and may
/// drop) handlers whose subscription has been cancelled.
#[derive(Debug, Clone)]
pub struct TickSubscription {
    active: Arc<AtomicBool>,
}

impl TickSubscription {
    /// Create an active subscription handle
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Cancel the subscription; idempotent
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.active.load(Ordering::SeqCst)
    }
}

impl Default for TickSubscription {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick broadcaster trait
///
/// One registration per call; the returned handle is the only way to stop
/// deliveries short of dropping whatever state the handler captured weakly.
pub trait TickBroadcaster: Send + Sync {
    /// Register a handler to be invoked once per simulation step
    fn register_on_tick(&self, handler: TickHandler) -> TickSubscription;
}
