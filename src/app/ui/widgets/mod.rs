pub mod progress;

pub use progress::draw_progress;
