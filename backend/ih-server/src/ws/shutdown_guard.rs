use tokio::sync::watch;

/// A task's view of the shutdown latch
pub struct ShutdownGuard {
    triggered: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(triggered: watch::Receiver<bool>) -> Self {
        Self { triggered }
    }

    /// Resolves once shutdown is triggered, immediately if it already was.
    /// A dropped coordinator counts as shutdown.
    pub async fn wait(&mut self) {
        let _ = self.triggered.wait_for(|triggered| *triggered).await;
    }

    /// Non-blocking check
    pub fn poll_shutdown(&self) -> bool {
        *self.triggered.borrow()
    }
}
