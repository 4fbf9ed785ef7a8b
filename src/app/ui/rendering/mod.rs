pub mod renderer;
pub mod utils;

pub use renderer::{clear_screen, draw_frame, paint_artwork};
