pub use crate::app::app::{App, LoopState};
pub use crate::app::main_loop::AppMainLoop;

// Module declarations
pub mod app;
pub mod artwork;
pub mod binds;
pub mod cli;
pub mod config;
pub mod cover_cache;
pub mod error;
pub mod event_handlers;
pub mod input;
pub mod layout;
pub mod logging;
pub mod main_loop;
pub mod player;
pub mod terminal;
pub mod ui;
