use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ih_config::ConfigError),

    #[error("Auth setup failed: {0}")]
    Auth(#[from] ih_auth::AuthError),

    #[error("Database error: {0}")]
    Database(#[from] ih_db::DbError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics exporter error: {message}")]
    Metrics { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
