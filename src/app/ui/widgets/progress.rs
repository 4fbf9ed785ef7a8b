use std::io::{self, Write};

use crate::app::layout::TerminalGeometry;
use crate::app::player::TrackMetadata;
use crate::app::ui::rendering::renderer::{BLANK_WIDTH, TEXT_COLUMN_OFFSET, write_at};
use crate::app::ui::rendering::utils::{centered_offset, format_time};

/// Cells in the progress bar
pub const PROGRESS_BAR_WIDTH: usize = 40;

pub const PROGRESS_ROW: i32 = 4;
pub const TIME_ROW: i32 = 5;

const FILLED: char = '━';
const EMPTY: char = '─';

/// Number of filled cells for the given position, always within `0..=width`.
pub fn progress_fill(position_secs: i64, length_secs: i64, width: usize) -> usize {
    if length_secs <= 0 {
        return 0;
    }
    let ratio = position_secs as f64 / length_secs as f64;
    (ratio * width as f64).round().clamp(0.0, width as f64) as usize
}

pub fn progress_bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}

pub fn time_label(position_secs: i64, length_secs: i64) -> String {
    format!("{}/{}", format_time(position_secs), format_time(length_secs))
}

/// Blank the progress and time rows, then draw the bar and a centered time label
pub fn draw_progress<W: Write>(
    out: &mut W,
    metadata: &TrackMetadata,
    geometry: &TerminalGeometry,
) -> io::Result<()> {
    let blank = " ".repeat(BLANK_WIDTH);
    write_at(out, geometry, TEXT_COLUMN_OFFSET, PROGRESS_ROW, &blank)?;
    write_at(out, geometry, TEXT_COLUMN_OFFSET, TIME_ROW, &blank)?;

    let filled = progress_fill(
        metadata.position_secs,
        metadata.length_secs,
        PROGRESS_BAR_WIDTH,
    );
    let bar = progress_bar(filled, PROGRESS_BAR_WIDTH);
    write_at(out, geometry, TEXT_COLUMN_OFFSET, PROGRESS_ROW, &bar)?;

    let label = time_label(metadata.position_secs, metadata.length_secs);
    let offset = TEXT_COLUMN_OFFSET + centered_offset(&label, PROGRESS_BAR_WIDTH);
    write_at(out, geometry, offset, TIME_ROW, &label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_bounds() {
        for length in [1i64, 7, 60, 215, 3600] {
            for position in [0i64, 1, length / 2, length, length + 10, length * 3] {
                let filled = progress_fill(position, length, PROGRESS_BAR_WIDTH);
                assert!(filled <= PROGRESS_BAR_WIDTH);
            }
            assert_eq!(progress_fill(length, length, PROGRESS_BAR_WIDTH), PROGRESS_BAR_WIDTH);
            assert_eq!(progress_fill(0, length, PROGRESS_BAR_WIDTH), 0);
        }
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert_eq!(progress_fill(0, 0, PROGRESS_BAR_WIDTH), 0);
        assert_eq!(progress_fill(120, 0, PROGRESS_BAR_WIDTH), 0);
    }

    #[test]
    fn test_fill_rounds() {
        // 1/3 of 40 = 13.33 -> 13, 2/3 of 40 = 26.67 -> 27
        assert_eq!(progress_fill(1, 3, PROGRESS_BAR_WIDTH), 13);
        assert_eq!(progress_fill(2, 3, PROGRESS_BAR_WIDTH), 27);
    }

    #[test]
    fn test_progress_bar_glyphs() {
        let bar = progress_bar(3, 5);
        assert_eq!(bar, "━━━──");
        assert_eq!(progress_bar(9, 5), "━━━━━");
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(65, 245), "01:05/04:05");
    }
}
