//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;

use crate::player::engine::Engine;
use crate::player::state::{InputResult, UiState};
use crate::player::view::TerminalView;

/// Per-event values supplied by the main loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputContext {
    /// Wall-clock reading in milliseconds
    pub now_ms: f64,
    /// Arrow-key seek step in milliseconds
    pub seek_step_ms: f64,
}

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Returns
/// `InputResult` indicating whether to continue, persist bookmarks, or quit
pub fn handle_event<V: TerminalView>(
    event: Event,
    engine: &mut Engine<V>,
    ui: &mut UiState,
    ctx: InputContext,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, engine, ui, ctx),
        Event::Mouse(mouse) => handle_mouse_event(mouse, engine, ui, ctx),
        Event::Resize(new_cols, new_rows) => {
            ui.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
