use serde::Serialize;

/// Outcome of a synchronize call
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// True only for the call that created the record
    pub created: bool,
    pub id: Option<String>,
}
