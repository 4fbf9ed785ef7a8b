use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, RestorePosition, SavePosition},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::app::layout::TerminalGeometry;
use crate::app::player::TrackMetadata;
use crate::app::ui::rendering::utils::{clip_columns, truncate_by_width};
use crate::app::ui::widgets::draw_progress;

/// Text starts right of the 18-cell artwork plus a two-cell gap
pub const TEXT_COLUMN_OFFSET: i32 = 20;
/// Width blanked before redrawing a text row
pub const BLANK_WIDTH: usize = 60;

pub const HEADER_ROW: i32 = 0;
pub const TITLE_ROW: i32 = 1;
pub const ARTIST_ROW: i32 = 2;

const HEADER: &str = "♫ Now Playing";

/// Print `text` at an offset from the origin.
///
/// Only the columns that fit on screen are printed, so a row never wraps or
/// scrolls the terminal. Rows outside the terminal are skipped.
pub fn write_at<W: Write>(
    out: &mut W,
    geometry: &TerminalGeometry,
    dx: i32,
    dy: i32,
    text: &str,
) -> io::Result<()> {
    match geometry.span(dx, dy) {
        Some(span) => queue!(
            out,
            MoveTo(span.x, span.y),
            Print(clip_columns(text, span.skip, span.columns))
        ),
        None => Ok(()),
    }
}

/// Draw header, title, artist and progress for one tick
pub fn draw_frame<W: Write>(
    out: &mut W,
    metadata: &TrackMetadata,
    geometry: &TerminalGeometry,
) -> io::Result<()> {
    write_at(out, geometry, TEXT_COLUMN_OFFSET, HEADER_ROW, HEADER)?;
    write_at(
        out,
        geometry,
        TEXT_COLUMN_OFFSET,
        TITLE_ROW,
        &truncate_by_width(&metadata.title, BLANK_WIDTH),
    )?;
    write_at(
        out,
        geometry,
        TEXT_COLUMN_OFFSET,
        ARTIST_ROW,
        &truncate_by_width(&format!("by {}", metadata.artist), BLANK_WIDTH),
    )?;
    draw_progress(out, metadata, geometry)?;
    out.flush()
}

/// Paint renderer rows at the artwork origin, keeping the cursor where it was
pub fn paint_artwork<W: Write>(
    out: &mut W,
    rows: &[String],
    geometry: &TerminalGeometry,
) -> io::Result<()> {
    queue!(out, SavePosition)?;
    for (dy, row) in rows.iter().enumerate() {
        write_at(out, geometry, 0, dy as i32, row)?;
    }
    queue!(out, RestorePosition)?;
    out.flush()
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
