use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the program before the event loop starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
    #[error("failed to connect to the session bus: {0}")]
    Bus(#[from] zbus::Error),
    #[error("could not determine the user cache directory")]
    NoCacheDir,
    #[error("failed to create cache directory {}: {source}", .path.display())]
    CacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to initialize terminal: {0}")]
    Terminal(#[source] io::Error),
    #[error("failed to start input reader: {0}")]
    Input(#[source] io::Error),
    #[error("failed to register signal handlers: {0}")]
    Signals(#[source] io::Error),
}
