//! Help overlay rendering for the native player.
//!
//! The overlay and the `play --help` text are both generated from
//! [`KEY_BINDINGS`], the table of controls the input handlers implement.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

/// One row of the controls table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub section: &'static str,
    /// Key labels, shown joined with " / "
    pub keys: &'static [&'static str],
    pub action: &'static str,
}

impl KeyBinding {
    pub fn label(&self) -> String {
        self.keys.join(" / ")
    }
}

const fn bind(
    section: &'static str,
    keys: &'static [&'static str],
    action: &'static str,
) -> KeyBinding {
    KeyBinding { section, keys, action }
}

/// Labels of pointer controls; they are handled by the mouse module.
pub const MOUSE_KEYS: &[&str] = &["click", "drag"];

/// Every player control, grouped by section in display order.
pub const KEY_BINDINGS: &[KeyBinding] = &[
    bind("Playback", &["space"], "Play / pause"),
    bind("Playback", &["s", "+", "="], "Next speed (0.5x .. 3x)"),
    bind("Playback", &["r"], "Restart and play"),
    bind("Seeking", &["←", "→"], "Seek back / forward one step"),
    bind("Seeking", &["Shift+←", "Shift+→"], "Seek 5% of the recording"),
    bind("Seeking", &["Home", "End"], "Start / end"),
    bind("Seeking", &["0-9"], "Jump to 0% .. 90%"),
    bind("Seeking", MOUSE_KEYS, "Seek on the progress bar"),
    bind("Commands", &["]", "["], "Next / previous command"),
    bind("Bookmarks", &["b"], "Bookmark this position"),
    bind("Bookmarks", &["n", "p"], "Next / previous bookmark"),
    bind("Bookmarks", &["d"], "Delete the last passed bookmark"),
    bind("General", &["?"], "Toggle this help"),
    bind("General", &["q", "Esc", "Ctrl+C"], "Quit"),
];

const TITLE: &str = "rewindtty player";
const FOOTER: &str = "Press any key to close";

fn label_width() -> usize {
    KEY_BINDINGS
        .iter()
        .map(|b| b.label().width())
        .max()
        .unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Section headers and binding rows, without the frame.
fn body_rows() -> Vec<String> {
    let key_width = label_width();
    let mut rows = Vec::new();
    let mut section = "";
    for binding in KEY_BINDINGS {
        if binding.section != section {
            if !section.is_empty() {
                rows.push(String::new());
            }
            section = binding.section;
            rows.push(format!(" {}", section));
        }
        rows.push(format!(
            "   {}  {}",
            pad(&binding.label(), key_width),
            binding.action
        ));
    }
    rows
}

/// The framed overlay, one string per terminal row.
///
/// All lines have the same display width.
pub fn help_lines() -> Vec<String> {
    let body = body_rows();
    let inner = body
        .iter()
        .map(|row| row.width())
        .chain([TITLE.width(), FOOTER.width()])
        .max()
        .unwrap_or(0)
        + 2;

    let centered = |text: &str| {
        let left = (inner - text.width()) / 2;
        format!("║{}║", pad(&format!("{}{}", " ".repeat(left), text), inner))
    };

    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(format!("╔{}╗", "═".repeat(inner)));
    lines.push(centered(TITLE));
    lines.push(format!("╠{}╣", "═".repeat(inner)));
    lines.extend(body.iter().map(|row| format!("║{}║", pad(row, inner))));
    lines.push(format!("║{}║", " ".repeat(inner)));
    lines.push(centered(FOOTER));
    lines.push(format!("╚{}╝", "═".repeat(inner)));
    lines
}

/// Plain controls listing for `play --help`.
pub fn controls_text() -> String {
    let key_width = label_width();
    let mut text = String::from("Controls:");
    for binding in KEY_BINDINGS {
        text.push_str(&format!(
            "\n  {}  {}",
            pad(&binding.label(), key_width),
            binding.action
        ));
    }
    text
}

/// Top-left cell that centers a `box_width` x `box_height` box.
fn origin(term_cols: u16, term_rows: u16, box_width: usize, box_height: usize) -> (u16, u16) {
    let col = (term_cols as usize).saturating_sub(box_width) / 2;
    let row = (term_rows as usize).saturating_sub(box_height) / 2;
    (col as u16, row as u16)
}

/// Clear the screen and draw the overlay centered; rows past the bottom
/// edge are dropped.
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let lines = help_lines();
    let box_width = lines.first().map(|l| l.width()).unwrap_or(0);
    let (col, start_row) = origin(width, height, box_width, lines.len());

    execute!(out, Clear(ClearType::All))?;
    for (row, line) in (start_row..height).zip(lines.iter()) {
        execute!(
            out,
            MoveTo(col, row),
            SetForegroundColor(Color::Green),
            Print(line),
            ResetColor,
        )?;
    }
    Ok(())
}
