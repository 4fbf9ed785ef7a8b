use clap::Parser;
use std::path::PathBuf;

use crate::app::config::{DisplayConfig, HorizontalAlign, LoggingConfig, VerticalAlign};

#[derive(Parser, Debug, Clone)]
#[command(name = "spotify-display")]
#[command(version)]
#[command(about = "A terminal now-playing overlay for Spotify with cover art", long_about = None)]
pub struct Args {
    /// Initial horizontal alignment
    #[arg(long, value_enum, default_value_t = HorizontalAlign::Center)]
    pub horizontal: HorizontalAlign,

    /// Initial vertical alignment
    #[arg(long, value_enum, default_value_t = VerticalAlign::Bottom)]
    pub vertical: VerticalAlign,

    /// Log level: error, warn, info, debug or trace
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    pub log_level: String,

    /// Directory for spotify-display.log
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,

    /// Program used to turn cover art into terminal cells
    #[arg(long, default_value = "chafa")]
    pub renderer: String,
}

impl Args {
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::with_alignment(self.horizontal, self.vertical)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            directory: self.log_dir.clone(),
            ..LoggingConfig::default()
        }
    }
}

/// Accept only the level names the logger understands
fn parse_log_level(s: &str) -> Result<String, String> {
    let level = s.to_lowercase();
    match level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(level),
        _ => Err(format!(
            "Invalid value '{}': expected error, warn, info, debug or trace",
            s
        )),
    }
}
