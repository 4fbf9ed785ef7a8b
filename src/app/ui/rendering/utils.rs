use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within the given display width, handling Unicode properly.
///
/// Shorter strings are padded with spaces so they overwrite anything left on
/// the row by a previous, longer value.
pub fn truncate_by_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(ch);
        current_width += char_width;
    }

    // Pad with spaces if needed
    while current_width < max_width {
        result.push(' ');
        current_width += 1;
    }

    result
}

/// Keep the columns `skip..skip + columns` of a row, measured in display width.
///
/// Escape sequences take no columns and are always kept, so colour state set
/// by a cut-off cell still reaches the visible ones. A wide character split by
/// the left edge becomes spaces; one split by the right edge is dropped.
pub fn clip_columns(s: &str, skip: usize, columns: usize) -> String {
    let end = skip + columns;
    let mut result = String::with_capacity(s.len());
    let mut column = 0;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            result.push(ch);
            copy_escape(&mut chars, &mut result);
            continue;
        }
        let next = column + ch.width().unwrap_or(0);
        if column >= skip && next <= end {
            result.push(ch);
        } else if column < skip && next > skip {
            for _ in skip..next.min(end) {
                result.push(' ');
            }
        }
        column = next;
    }

    result
}

/// Copy the rest of an escape sequence whose ESC was already consumed
fn copy_escape(chars: &mut impl Iterator<Item = char>, out: &mut String) {
    match chars.next() {
        Some('[') => {
            out.push('[');
            for ch in chars.by_ref() {
                out.push(ch);
                if ('@'..='~').contains(&ch) {
                    break;
                }
            }
        }
        Some(ch) => out.push(ch),
        None => {}
    }
}

/// Format seconds as MM:SS. Minutes are not wrapped into hours.
pub fn format_time(total_seconds: i64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Column offset that centers `text` inside `width` cells
pub fn centered_offset(text: &str, width: usize) -> i32 {
    (width as i32 - text.width() as i32) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(59), "00:59");
    }

    #[test]
    fn test_truncate_pads_short_strings() {
        assert_eq!(truncate_by_width("abc", 6), "abc   ");
    }

    #[test]
    fn test_truncate_clips_by_display_width() {
        assert_eq!(truncate_by_width("hello world", 5), "hello");
        // Wide characters never get split across the limit
        assert_eq!(truncate_by_width("中文字", 5), "中文 ");
    }

    #[test]
    fn test_clip_columns_cuts_both_edges() {
        assert_eq!(clip_columns("hello world", 0, 5), "hello");
        assert_eq!(clip_columns("hello world", 6, 80), "world");
        assert_eq!(clip_columns("abc", 0, 10), "abc");
        assert_eq!(clip_columns("abc", 5, 10), "");
    }

    #[test]
    fn test_clip_columns_wide_characters() {
        // 中 spans columns 0-1; cutting at column 1 leaves one blank cell
        assert_eq!(clip_columns("中文字", 1, 10), " 文字");
        assert_eq!(clip_columns("中文字", 0, 3), "中");
    }

    #[test]
    fn test_clip_columns_keeps_escape_sequences() {
        let row = "\x1b[38;5;196m\u{2588}\u{2588}\x1b[38;5;21m\u{2588}\u{2588}\x1b[0m";
        assert_eq!(
            clip_columns(row, 0, 3),
            "\x1b[38;5;196m\u{2588}\u{2588}\x1b[38;5;21m\u{2588}\x1b[0m"
        );
        assert_eq!(
            clip_columns(row, 3, 3),
            "\x1b[38;5;196m\x1b[38;5;21m\u{2588}\x1b[0m"
        );
    }

    #[test]
    fn test_centered_offset() {
        assert_eq!(centered_offset("02:05/04:10", 40), 14);
        assert_eq!(centered_offset("", 40), 20);
    }
}
