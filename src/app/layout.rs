use crate::app::config::{DisplayConfig, HorizontalAlign, VerticalAlign};

/// Terminal size and overlay origin for a single tick.
///
/// Origins may be negative when the terminal is smaller than the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub width: i32,
    pub height: i32,
    pub origin_x: i32,
    pub origin_y: i32,
}

/// Visible part of a row that starts at an offset from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First on-screen cell
    pub x: u16,
    pub y: u16,
    /// Leading columns that fall left of the screen
    pub skip: usize,
    /// Columns left between `x` and the right edge
    pub columns: usize,
}

impl TerminalGeometry {
    /// Where a row starting at `(dx, dy)` lands on screen, or `None` when no
    /// part of it can be visible.
    pub fn span(&self, dx: i32, dy: i32) -> Option<RowSpan> {
        let x = self.origin_x + dx;
        let y = self.origin_y + dy;
        if y < 0 || y >= self.height {
            return None;
        }
        let start = x.max(0);
        if start >= self.width {
            return None;
        }
        Some(RowSpan {
            x: u16::try_from(start).ok()?,
            y: u16::try_from(y).ok()?,
            skip: usize::try_from(start - x).ok()?,
            columns: usize::try_from(self.width - start).ok()?,
        })
    }
}

pub fn compute_geometry(width: u16, height: u16, config: &DisplayConfig) -> TerminalGeometry {
    let width = i32::from(width);
    let height = i32::from(height);

    let origin_x = match config.horizontal {
        HorizontalAlign::Left => config.margin,
        HorizontalAlign::Center => (width - config.min_width) / 2,
        HorizontalAlign::Right => width - config.min_width - config.margin,
    };

    let origin_y = match config.vertical {
        VerticalAlign::Top => config.margin,
        VerticalAlign::Center => (height - config.content_height) / 2,
        VerticalAlign::Bottom => height - config.content_height - config.margin,
    };

    TerminalGeometry {
        width,
        height,
        origin_x,
        origin_y,
    }
}
