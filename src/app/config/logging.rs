use std::path::PathBuf;

/// Runtime logging options, assembled from the command line
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Directory holding the log file
    pub directory: PathBuf,
    /// Append to an existing log file instead of truncating it
    pub append_to_file: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }

    fn default_directory() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_append_to_file() -> bool {
        true
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            directory: Self::default_directory(),
            append_to_file: Self::default_append_to_file(),
        }
    }
}
