//! Identity assertion issued by the Identity Store for the current session.

use crate::SyncProfile;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    pub subject_id: String,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl IdentityAssertion {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.primary_email = Some(email.into());
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// "first last", trimmed. Missing parts count as empty strings.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// True once the assertion carries both a subject id and a primary email
    pub fn is_complete(&self) -> bool {
        !self.subject_id.is_empty()
            && self
                .primary_email
                .as_deref()
                .is_some_and(|email| !email.is_empty())
    }

    /// Profile to synchronize, or `None` while the identity is still incomplete
    pub fn to_sync_profile(&self) -> Option<SyncProfile> {
        if !self.is_complete() {
            return None;
        }

        Some(SyncProfile {
            external_identity_id: self.subject_id.clone(),
            display_name: self.display_name(),
            email: self.primary_email.clone()?,
            avatar_url: self.avatar_url.clone(),
        })
    }
}
