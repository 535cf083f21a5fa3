//! Progress bar rendering for the native player.
//!
//! Displays playback progress with session boundaries and bookmarks.

use std::io::{self, Write};

use anyhow::Result;

use crate::player::playback::{Bookmark, TimelineEntry};

/// Format a time in milliseconds to MM:SS format.
///
/// # Arguments
/// * `time_ms` - Time in milliseconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_time(time_ms: f64) -> String {
    let total_secs = (time_ms / 1000.0) as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the progress bar character array.
///
/// Creates a visual representation of the progress bar including the
/// playhead, session boundaries and bookmark indicators. Bookmarks win over
/// session boundaries; the playhead wins over both.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_ms` - Current playback time
/// * `total_ms` - Total duration of the recording
/// * `sessions` - Timeline entries (session starts)
/// * `bookmarks` - Bookmarks to mark on the bar
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_ms: f64,
    total_ms: f64,
    sessions: &[TimelineEntry],
    bookmarks: &[Bookmark],
) -> (Vec<char>, usize) {
    let progress = if total_ms > 0.0 {
        (current_ms / total_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    // First session always starts at 0, no tick for it
    for entry in sessions.iter().skip(1) {
        let pos = (entry.position_fraction * bar_width as f64) as usize;
        if pos < bar_width {
            bar[pos] = '┼';
        }
    }

    for bookmark in bookmarks {
        let pos = if total_ms > 0.0 {
            ((bookmark.time_ms / total_ms) * bar_width as f64) as usize
        } else {
            0
        };
        if pos < bar_width {
            bar[pos] = '◆';
        }
    }

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    (bar, filled)
}

/// Fraction of the recording under a column of the progress bar.
///
/// The bar starts at column 1. Returns `None` outside the bar.
pub fn fraction_at_column(column: u16, bar_width: usize) -> Option<f64> {
    let bar_start = 1u16;
    if bar_width == 0 || column < bar_start || column as usize >= bar_start as usize + bar_width {
        return None;
    }
    Some((column - bar_start) as f64 / bar_width as f64)
}

/// Render the progress bar.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `current_ms` - Current playback time
/// * `total_ms` - Total duration of the recording
/// * `sessions` - Timeline entries
/// * `bookmarks` - Bookmarks
pub fn render_progress_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    current_ms: f64,
    total_ms: f64,
    sessions: &[TimelineEntry],
    bookmarks: &[Bookmark],
) -> Result<()> {
    let bar_width = (width as usize).saturating_sub(14); // Account for padding and time display
    let (bar, filled) = build_progress_bar_chars(bar_width, current_ms, total_ms, sessions, bookmarks);

    let time_display = format!(" {}/{}", format_time(current_ms), format_time(total_ms));

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1)); // Move cursor
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    // ANSI color codes
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const CYAN: &str = "\x1b[36m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    for (i, &c) in bar.iter().enumerate() {
        let color = match c {
            '◆' => YELLOW,
            '┼' => CYAN,
            '⏺' => WHITE,
            _ if i < filled => GREEN,
            _ => DARK_GREY,
        };
        output.push_str(color);
        if i < filled && c == '─' {
            output.push('━');
        } else {
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    // Fill remaining width
    let used_width = 1 + bar_width + time_display.len();
    let remaining = (width as usize).saturating_sub(used_width);
    output.push_str(&" ".repeat(remaining));

    output.push_str("\x1b[0m"); // Reset
    write!(stdout, "{}", output)?;

    Ok(())
}
