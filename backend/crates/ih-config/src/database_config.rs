use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_DATABASE_MAX_CONNECTIONS,
    MAX_DATABASE_MAX_CONNECTIONS, MIN_DATABASE_MAX_CONNECTIONS, bounds::check_range,
};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// SQLite storage for the user directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, relative to the config directory
    pub path: String,
    /// Pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_DATABASE_FILENAME),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// The file must stay inside the config directory.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        check_range(
            "database.max_connections",
            self.max_connections,
            MIN_DATABASE_MAX_CONNECTIONS,
            MAX_DATABASE_MAX_CONNECTIONS,
        )
    }

    pub fn resolve(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.path)
    }
}
