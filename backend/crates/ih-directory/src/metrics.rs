use ih_core::Role;

use metrics::{counter, gauge};

/// Metrics for directory operations and live reads
#[derive(Clone)]
pub struct DirectoryMetrics {
    prefix: &'static str,
}

impl DirectoryMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "ih_directory",
        }
    }

    pub fn user_created(&self) {
        counter!(format!("{}.sync.created", self.prefix)).increment(1);
    }

    pub fn sync_existing(&self) {
        counter!(format!("{}.sync.existing", self.prefix)).increment(1);
    }

    pub fn role_assigned(&self, role: Role) {
        counter!(format!("{}.roles.assigned", self.prefix)).increment(1);
        counter!(format!("{}.roles.assigned.{}", self.prefix, role.as_str())).increment(1);
    }

    pub fn profile_refreshed(&self) {
        counter!(format!("{}.profiles.refreshed", self.prefix)).increment(1);
    }

    pub fn list_served(&self) {
        counter!(format!("{}.list.served", self.prefix)).increment(1);
    }

    /// Failed operation, by error kind
    pub fn operation_failed(&self, kind: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, kind)).increment(1);
    }

    pub fn watch_opened(&self) {
        counter!(format!("{}.watches.opened", self.prefix)).increment(1);
        gauge!(format!("{}.watches.active", self.prefix)).increment(1.0);
    }

    pub fn watch_closed(&self) {
        gauge!(format!("{}.watches.active", self.prefix)).decrement(1.0);
    }

    pub fn change_published(&self, receivers: usize) {
        counter!(format!("{}.changes.published", self.prefix)).increment(1);
        gauge!(format!("{}.changes.last_receivers", self.prefix)).set(receivers as f64);
    }
}

impl Default for DirectoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}
