use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    /// "candidate" or "interviewer"; parsed by the handler so bad literals name the field
    pub role: String,
}
