use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError,
    ConfigErrorResult, DatabaseConfig, DirectoryConfig, LoggingConfig, RateLimitConfig,
    ServerConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub directory: DirectoryConfig,
    pub websocket: WebSocketConfig,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. IH_CONFIG_DIR env var, else ./.ih/
    /// 2. Auto-create the config directory
    /// 3. config.toml if it exists, else defaults
    /// 4. IH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: IH_CONFIG_DIR env var > ./.ih/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration. Call after load() to catch errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.directory.validate()?;
        self.websocket.validate()?;
        self.rate_limit.validate()?;
        self.database.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(self.database.resolve(&Self::config_dir()?))
    }

    /// Log file path when file logging is on.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };

        Ok(Some(
            Self::config_dir()?.join(&self.logging.dir).join(file),
        ))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections, timeout {}s)",
            self.server.host,
            self.server.port,
            self.server.max_connections,
            self.server.request_timeout_secs
        );
        info!(
            "  database: {} (pool {})",
            self.database.path, self.database.max_connections
        );

        let auth_type = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };

        info!(
            "  auth: {} ({})",
            if self.auth.enabled {
                "enabled"
            } else {
                "disabled"
            },
            auth_type
        );

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("-")
        );

        info!(
            "  directory: list_policy={}, feed_capacity={}",
            self.directory.list_policy, self.directory.feed_capacity
        );

        info!(
            "  websocket: buffer={}, heartbeat={}s/{}s",
            self.websocket.send_buffer_size,
            self.websocket.heartbeat_interval_secs,
            self.websocket.heartbeat_timeout_secs
        );

        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );
    }

    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        // Server
        Self::apply_env_string("IH_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IH_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "IH_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_parse(
            "IH_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );

        // Database
        Self::apply_env_string("IH_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IH_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_bool("IH_AUTH_ENABLED", &mut self.auth.enabled);
        Self::apply_env_option_string("IH_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "IH_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );

        // Logging
        Self::apply_env_parse("IH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IH_LOG_FILE", &mut self.logging.file);

        // Directory: unknown policy names are an error, never a fallback
        if let Ok(val) = std::env::var("IH_DIRECTORY_LIST_POLICY") {
            self.directory.list_policy = val.parse()?;
        }
        Self::apply_env_parse(
            "IH_DIRECTORY_FEED_CAPACITY",
            &mut self.directory.feed_capacity,
        );

        // WebSocket
        Self::apply_env_parse(
            "IH_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "IH_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
        );
        Self::apply_env_parse(
            "IH_WS_HEARTBEAT_TIMEOUT_SECS",
            &mut self.websocket.heartbeat_timeout_secs,
        );

        // Rate limit
        Self::apply_env_parse(
            "IH_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "IH_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        Ok(())
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
