use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Chatty dependencies, capped regardless of the configured level
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "tungstenite", "tokio_tungstenite"];

/// Install the global `fern` logger.
///
/// Output goes to `log_file` when set (never colored), else to stdout.
pub fn initialize(
    log_level: ih_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = *log_level;

    let colors = (colored && log_file.is_none()).then(|| {
        ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red)
    });

    let mut dispatch = Dispatch::new()
        .format(move |out, message, record| {
            let level = match &colors {
                Some(colors) => colors.color(record.level()).to_string(),
                None => record.level().to_string(),
            };
            out.finish(format_args!(
                "[{} - {}] {} [{}:{}]",
                humantime::format_rfc3339(SystemTime::now()),
                level,
                message,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
            ))
        })
        .level(level_filter);

    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(*target, level_filter.min(LevelFilter::Warn));
    }

    let dispatch = match &log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ServerError::Logger {
                    message: format!("Failed to create log directory {}: {}", parent.display(), e),
                })?;
            }
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;
            dispatch.chain(file)
        }
        None => dispatch.chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match log_file {
        Some(path) => info!("Logging at {} to {}", level_filter, path.display()),
        None => info!("Logging at {} to stdout", level_filter),
    }

    Ok(())
}
