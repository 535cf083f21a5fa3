//! Status bar rendering for the native player.
//!
//! Displays playback state, speed, the active command, and key hints.

use std::io::{self, Write};

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::player::state::Speed;

// ANSI color codes
const WHITE: &str = "\x1b[97m";
const DARK_GREY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Key hints shown at the end of the status bar.
const HINTS: &[(&str, &str)] = &[
    ("s", ":spd "),
    ("b", ":mark "),
    ("n/p", ":jump "),
    ("?", ":hlp "),
    ("q", ":quit"),
];

/// Truncate text to a display width, appending `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Everything the status bar shows.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub playing: bool,
    pub speed: Speed,
    pub command: Option<&'a str>,
    pub bookmark_count: usize,
    pub message: Option<&'a str>,
}

/// Build the status line (without cursor positioning).
///
/// The result is padded to exactly `width` visible columns.
pub fn build_status_line(width: u16, info: &StatusInfo<'_>) -> String {
    let width = width as usize;
    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0;

    output.push_str(WHITE);
    output.push(' ');
    visible_len += 1;

    let icon = if info.playing { "⏸  " } else { "▶  " };
    output.push_str(icon);
    visible_len += icon.width();

    output.push_str(DARK_GREY);
    output.push_str("spd:");
    output.push_str(WHITE);
    let speed_str = format!("{} ", info.speed);
    visible_len += 4 + speed_str.len();
    output.push_str(&speed_str);

    if info.bookmark_count > 0 {
        output.push_str(YELLOW);
        let marks = format!("◆{} ", info.bookmark_count);
        visible_len += marks.width();
        output.push_str(&marks);
    }

    let hints_len: usize = 2 + HINTS.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>();

    // Message takes precedence over the command name
    let (color, text) = match (info.message, info.command) {
        (Some(message), _) => (GREEN, message),
        (None, Some(command)) => (WHITE, command),
        (None, None) => (WHITE, ""),
    };
    let room = width.saturating_sub(visible_len + hints_len + 1);
    let shown = truncate_to_width(text, room);
    output.push_str(color);
    output.push_str(&shown);
    output.push(' ');
    visible_len += shown.width() + 1;

    if visible_len + hints_len <= width {
        // Right-align the hints
        output.push_str(&" ".repeat(width - visible_len - hints_len));
        visible_len = width - hints_len;
        output.push_str(DARK_GREY);
        output.push_str("│ ");
        for (key, label) in HINTS {
            output.push_str(CYAN);
            output.push_str(key);
            output.push_str(DARK_GREY);
            output.push_str(label);
        }
        visible_len += hints_len;
    }

    // Pad to full width to overwrite any leftover content
    output.push_str(&" ".repeat(width.saturating_sub(visible_len)));
    output.push_str(RESET);
    output
}

/// Render a separator line.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line(stdout: &mut io::Stdout, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    output.push_str(&"─".repeat(width as usize));
    output.push_str(RESET);
    write!(stdout, "{}", output)?;
    Ok(())
}

/// Render the status/controls bar.
pub fn render_status_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    info: &StatusInfo<'_>,
) -> Result<()> {
    write!(
        stdout,
        "\x1b[{};1H{}",
        row + 1,
        build_status_line(width, info)
    )?;
    Ok(())
}
