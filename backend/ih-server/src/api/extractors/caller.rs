//! Resolves the caller identity attached to a request

use crate::{ApiError, AppState};

use ih_auth::{CallerIdentity, DEV_USER_HEADER, bearer_token};

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The verified caller, or `None` when the request carries no identity.
///
/// With token verification on, only `Authorization: Bearer <jwt>` counts and a
/// bad token is rejected outright. With it off, the `X-User-Id` header names
/// the caller.
pub struct Caller(pub Option<CallerIdentity>);

impl Caller {
    pub fn identity(&self) -> Option<&CallerIdentity> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let headers = &parts.headers;

            let Some(validator) = &state.jwt_validator else {
                let subject = headers
                    .get(DEV_USER_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .map(str::trim)
                    .filter(|value| !value.is_empty());

                if let Some(subject) = subject {
                    log::debug!("Caller from {} header: {}", DEV_USER_HEADER, subject);
                }
                return Ok(Caller(subject.map(CallerIdentity::from_subject)));
            };

            let Some(header) = headers.get(AUTHORIZATION) else {
                return Ok(Caller(None));
            };

            let header = header
                .to_str()
                .map_err(|_| ApiError::unauthenticated("Authorization header is not valid text"))?;
            let token = bearer_token(Some(header))?;
            let claims = validator.validate(token)?;

            Ok(Caller(Some(CallerIdentity::from_claims(claims))))
        }
    }
}
