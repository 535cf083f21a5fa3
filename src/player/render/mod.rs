//! Rendering components for the native player.
//!
//! This module contains the chrome drawn below the replayed output:
//! progress bar, status bar, and the help overlay.

mod help;
mod progress;
mod status;

pub use help::{controls_text, help_lines, render_help, KeyBinding, KEY_BINDINGS, MOUSE_KEYS};
pub use progress::{build_progress_bar_chars, format_time, fraction_at_column, render_progress_bar};
pub use status::{
    build_status_line, render_separator_line, render_status_bar, truncate_to_width, StatusInfo,
};
