use ih_server::{
    AppState, ConnectionRegistry, ServerError, ShutdownCoordinator, WsMetrics, build_router,
    logger,
};

use ih_auth::{JwtValidator, RateLimiterFactory};
use ih_config::Config;
use ih_directory::UserDirectory;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting ih-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ih_db::open_pool(&database_path, config.database.max_connections).await?;
    info!("Database ready");

    let jwt_validator = if config.auth.enabled {
        let validator = JwtValidator::from_config(&config.auth, &Config::config_dir()?)?;
        info!("JWT: {} authentication enabled", validator.algorithm());
        Some(Arc::new(validator))
    } else {
        warn!("Authentication DISABLED - callers are named by the X-User-Id header");
        None
    };

    let directory = UserDirectory::new(pool.clone(), &config.directory);
    info!("User directory list policy: {}", directory.policy());

    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        pool: pool.clone(),
        directory,
        jwt_validator,
        rate_limiter_factory: RateLimiterFactory::new(config.rate_limit.clone()),
        registry: ConnectionRegistry::new(config.server.max_connections),
        metrics: WsMetrics::new(),
        shutdown: shutdown.clone(),
        websocket: config.websocket.clone(),
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        prometheus: Some(prometheus),
    };

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
        })
        .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
