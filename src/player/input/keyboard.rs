//! Keyboard input handling for the native player.
//!
//! Handles all keyboard shortcuts including playback controls,
//! seeking, command jumps and bookmarks. Keep
//! [`KEY_BINDINGS`](crate::player::render::KEY_BINDINGS) in step with the
//! match below.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::engine::Engine;
use crate::player::input::InputContext;
use crate::player::state::{InputResult, UiState};
use crate::player::view::TerminalView;

/// Fraction of the recording skipped by Shift+arrow.
const SHIFT_SEEK_FRACTION: f64 = 0.05;

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
pub fn handle_key_event<V: TerminalView>(
    key: KeyEvent,
    engine: &mut Engine<V>,
    ui: &mut UiState,
    ctx: InputContext,
) -> InputResult {
    // If help is showing, any key closes it
    if ui.show_help {
        ui.toggle_help();
        return InputResult::Continue;
    }

    let now = ctx.now_ms;
    ui.needs_render = true;

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        KeyCode::Char('?') => {
            ui.toggle_help();
            InputResult::Continue
        }

        // === Playback controls ===
        KeyCode::Char(' ') => {
            let was_playing = engine.state().is_playing;
            if !engine.toggle(now) && !was_playing {
                ui.set_message("End of recording, press r to restart");
            }
            InputResult::Continue
        }
        KeyCode::Char('s') | KeyCode::Char('+') | KeyCode::Char('=') => {
            let speed = engine.cycle_speed(now);
            ui.set_message(format!("Speed {}", speed));
            InputResult::Continue
        }
        KeyCode::Char('r') => {
            engine.restart();
            engine.play(now);
            InputResult::Continue
        }

        // === Seeking ===
        KeyCode::Left => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                let fraction = engine.progress() - SHIFT_SEEK_FRACTION;
                engine.seek_to_fraction(fraction, now);
            } else {
                engine.seek_by_ms(-ctx.seek_step_ms, now);
            }
            InputResult::Continue
        }
        KeyCode::Right => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                let fraction = engine.progress() + SHIFT_SEEK_FRACTION;
                engine.seek_to_fraction(fraction, now);
            } else {
                engine.seek_by_ms(ctx.seek_step_ms, now);
            }
            InputResult::Continue
        }
        KeyCode::Home => {
            engine.seek_to_time_ms(0.0, now);
            InputResult::Continue
        }
        KeyCode::End => {
            engine.seek_to_fraction(1.0, now);
            InputResult::Continue
        }
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c.to_digit(10).unwrap_or(0) as f64;
            engine.seek_to_fraction(tenth / 10.0, now);
            InputResult::Continue
        }

        // === Commands ===
        KeyCode::Char(']') => {
            if engine.seek_to_next_session(now).is_none() {
                ui.set_message("No later command");
            }
            InputResult::Continue
        }
        KeyCode::Char('[') => {
            if engine.seek_to_previous_session(now).is_none() {
                ui.set_message("No earlier command");
            }
            InputResult::Continue
        }

        // === Bookmarks ===
        KeyCode::Char('b') => {
            let name = format!("Bookmark {}", engine.bookmarks().len() + 1);
            let bookmark = engine.add_bookmark(name);
            ui.set_message(format!("Added {}", bookmark.name));
            InputResult::BookmarksChanged
        }
        KeyCode::Char('n') => {
            let current = engine.state().current_time_ms;
            match engine.bookmarks().next_after(current).map(|b| b.id.clone()) {
                Some(id) => {
                    engine.seek_to_bookmark(&id, now);
                }
                None => ui.set_message("No later bookmark"),
            }
            InputResult::Continue
        }
        KeyCode::Char('p') => {
            let current = engine.state().current_time_ms;
            match engine
                .bookmarks()
                .previous_before(current)
                .map(|b| b.id.clone())
            {
                Some(id) => {
                    engine.seek_to_bookmark(&id, now);
                }
                None => ui.set_message("No earlier bookmark"),
            }
            InputResult::Continue
        }
        KeyCode::Char('d') => {
            let current = engine.state().current_time_ms;
            let target = engine
                .bookmarks()
                .last_at_or_before(current)
                .map(|b| (b.id.clone(), b.name.clone()));
            match target {
                Some((id, name)) => {
                    engine.remove_bookmark(&id);
                    ui.set_message(format!("Removed {}", name));
                    InputResult::BookmarksChanged
                }
                None => {
                    ui.set_message("No bookmark to remove");
                    InputResult::Continue
                }
            }
        }

        _ => InputResult::Continue,
    }
}
