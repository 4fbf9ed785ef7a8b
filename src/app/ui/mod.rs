pub mod rendering;
pub mod widgets;

pub use rendering::{clear_screen, draw_frame, paint_artwork};
