pub mod bearer;
pub mod caller_identity;
pub mod claims;
pub mod connection_rate_limiter;
pub mod error;
pub mod jwt_validator;
pub mod rate_limiter_factory;

pub use bearer::bearer_token;
pub use caller_identity::CallerIdentity;
pub use claims::Claims;
pub use connection_rate_limiter::ConnectionRateLimiter;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use rate_limiter_factory::RateLimiterFactory;

/// Header naming the caller when token verification is disabled
pub const DEV_USER_HEADER: &str = "x-user-id";

#[cfg(test)]
mod tests;
