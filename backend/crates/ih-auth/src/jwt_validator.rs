use crate::{AuthError, Claims, Result as AuthErrorResult};

use ih_config::AuthConfig;

use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use log::info;

/// Clock skew tolerance between this server and the Identity Store
const LEEWAY_SECS: u64 = 30;

/// Verifies identity tokens issued by the Identity Store
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
}

impl JwtValidator {
    /// HS256 (shared secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Self::validation_for(Algorithm::HS256),
            algorithm: Algorithm::HS256,
        }
    }

    /// RS256 (Identity Store public key)
    #[track_caller]
    pub fn with_rs256(public_key_pem: &str) -> AuthErrorResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidToken {
                message: format!("Invalid RSA public key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self {
            decoding_key,
            validation: Self::validation_for(Algorithm::RS256),
            algorithm: Algorithm::RS256,
        })
    }

    /// Build from the auth section. The secret wins when both are set.
    #[track_caller]
    pub fn from_config(config: &AuthConfig, config_dir: &Path) -> AuthErrorResult<Self> {
        if let Some(secret) = &config.jwt_secret {
            info!("Identity tokens verified with HS256");
            return Ok(Self::with_hs256(secret.as_bytes()));
        }

        let Some(path) = config.public_key_path(config_dir) else {
            return Err(AuthError::NotConfigured {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let pem = std::fs::read_to_string(&path).map_err(|e| AuthError::KeyFile {
            path: path.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Identity tokens verified with RS256 ({})", path.display());
        Self::with_rs256(&pem)
    }

    fn validation_for(algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = LEEWAY_SECS;
        validation
    }

    /// Verify signature and expiry, then the claims themselves
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    pub fn algorithm(&self) -> &str {
        match self.algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            _ => "unknown",
        }
    }
}
