use crate::{ConfigError, ConfigErrorResult, DEFAULT_AUTH_ENABLED, MIN_JWT_SECRET_LENGTH};

use std::path::Path;

use serde::Deserialize;

/// Identity token verification.
///
/// When disabled, the server trusts the `X-User-Id` header as the caller
/// identity. Local development only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    /// HS256 shared secret
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM), relative to the config directory
    pub jwt_public_key_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_AUTH_ENABLED,
            jwt_secret: None,
            jwt_public_key_path: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (Some(secret), _) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
            (None, Some(key_path)) => {
                let path = Path::new(key_path);
                if path.is_absolute() {
                    return Err(ConfigError::auth(
                        "auth.jwt_public_key_path must be relative to the config directory",
                    ));
                }
                if key_path.contains("..") {
                    return Err(ConfigError::auth(
                        "auth.jwt_public_key_path cannot contain '..'",
                    ));
                }

                let full_path = config_dir.join(path);
                if !full_path.exists() {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_public_key_path does not exist: {}",
                        full_path.display()
                    )));
                }
            }
            (None, None) => {
                return Err(ConfigError::auth(
                    "auth.enabled requires auth.jwt_secret or auth.jwt_public_key_path",
                ));
            }
        }

        Ok(())
    }

    /// Absolute path to the RS256 public key, if configured.
    pub fn public_key_path(&self, config_dir: &Path) -> Option<std::path::PathBuf> {
        self.jwt_public_key_path
            .as_ref()
            .map(|path| config_dir.join(path))
    }
}
