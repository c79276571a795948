use metrics::{counter, gauge};

/// Metrics collector for live feed connections
#[derive(Clone)]
pub struct WsMetrics {
    prefix: &'static str,
}

impl WsMetrics {
    pub fn new() -> Self {
        Self { prefix: "ih_ws" }
    }

    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    pub fn connection_rejected(&self, reason: &str) {
        counter!(format!("{}.connections.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// `reason` is "normal" or "error"
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    pub fn message_received(&self) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
    }

    pub fn message_sent(&self, message_type: &str) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
        counter!(format!("{}.messages.sent.{}", self.prefix, message_type)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for WsMetrics {
    fn default() -> Self {
        Self::new()
    }
}
