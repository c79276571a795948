use crate::Claims;

use ih_core::IdentityAssertion;

/// The verified identity attached to a request.
///
/// Built from token claims when verification is on, or from the development
/// header when it is off. Handlers never see unverified claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub external_identity_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl CallerIdentity {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            external_identity_id: claims.sub,
            email: claims.email,
            first_name: claims.given_name,
            last_name: claims.family_name,
            avatar_url: claims.picture,
        }
    }

    /// Development-mode caller: only the subject is known
    pub fn from_subject(external_identity_id: impl Into<String>) -> Self {
        Self {
            external_identity_id: external_identity_id.into(),
            email: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
        }
    }

    pub fn to_identity_assertion(&self) -> IdentityAssertion {
        IdentityAssertion {
            subject_id: self.external_identity_id.clone(),
            primary_email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}
