use crate::ShutdownGuard;

use std::sync::Arc;

use tokio::sync::watch;

/// One latch shared by the HTTP server and every live feed connection.
///
/// Once triggered it stays triggered; guards created afterwards see it at once.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    triggered: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (triggered, _) = watch::channel(false);
        Self {
            triggered: Arc::new(triggered),
        }
    }

    /// Called from the signal handler
    pub fn shutdown(&self) {
        if !self.triggered.send_replace(true) {
            log::info!(
                "Shutdown signal received, closing {} feed subscriber(s)",
                self.triggered.receiver_count()
            );
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.triggered.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.triggered.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
