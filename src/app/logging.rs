use crate::app::config::LoggingConfig;
use flexi_logger::{FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "spotify-display";

/// Initialize the file logger. The returned handle must be kept alive and
/// flushed on shutdown.
pub fn init_logger(config: &LoggingConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let mut logger = Logger::try_with_str(config.level.to_lowercase())?
        .log_to_file(
            FileSpec::default()
                .directory(&config.directory)
                .basename(LOG_BASENAME)
                .suppress_timestamp(),
        )
        .format_for_files(custom_log_format)
        .use_utc();

    if config.append_to_file {
        logger = logger.append();
    }

    let handle = logger.start()?;
    log::info!("Logger initialized with level: {}", config.level);
    log::info!(
        "Log file location: {}",
        get_log_file_path(&config.directory).display()
    );

    Ok(handle)
}

/// Get the full path to the log file inside `directory`
pub fn get_log_file_path(directory: &Path) -> PathBuf {
    directory.join(format!("{}.log", LOG_BASENAME))
}

/// Custom log format for file output
fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// Log application startup information
pub fn log_startup_info(config: &LoggingConfig) {
    log::info!("=== spotify-display Starting ===");
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log::info!("OS: {}", std::env::consts::OS);
    log::info!("Architecture: {}", std::env::consts::ARCH);
    log::info!("Log file: {}", get_log_file_path(&config.directory).display());
}

/// Log application shutdown information
pub fn log_shutdown_info() {
    log::info!("=== spotify-display Shutting Down ===");
}

/// Log session bus connection attempts
pub fn log_bus_connection(success: bool, error: Option<&str>) {
    if success {
        log::info!("Connected to the session bus");
    } else {
        log::error!(
            "Failed to connect to the session bus - {}",
            error.unwrap_or("Unknown error")
        );
    }
}

/// Log user interactions for debugging
pub fn log_user_interaction(action: &str, context: Option<&str>) {
    match context {
        Some(ctx) => log::debug!("User action: {} - {}", action, ctx),
        None => log::debug!("User action: {}", action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_configured_directory() {
        assert_eq!(
            get_log_file_path(Path::new(".")),
            PathBuf::from("./spotify-display.log")
        );
    }
}
