pub mod display;
pub mod logging;

pub use display::{DisplayConfig, HorizontalAlign, VerticalAlign};
pub use logging::LoggingConfig;
