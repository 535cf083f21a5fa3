//! Mouse input handling for the native player.
//!
//! Handles click-to-seek and drag-to-scrub on the progress bar.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::engine::Engine;
use crate::player::input::InputContext;
use crate::player::render::fraction_at_column;
use crate::player::state::{InputResult, UiState};
use crate::player::view::TerminalView;

/// Handle a mouse event.
///
/// A left press on the progress bar starts a scrub and seeks there; dragging
/// keeps seeking; releasing ends the scrub and resumes playback if it was
/// running before.
pub fn handle_mouse_event<V: TerminalView>(
    mouse: MouseEvent,
    engine: &mut Engine<V>,
    ui: &mut UiState,
    ctx: InputContext,
) -> InputResult {
    let bar_width = ui.progress_bar_width();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if mouse.row == ui.progress_row() => {
            if let Some(fraction) = fraction_at_column(mouse.column, bar_width) {
                engine.begin_scrub();
                engine.scrub_to_fraction(fraction, ctx.now_ms);
                ui.needs_render = true;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if engine.is_scrubbing() => {
            // Dragging past either end pins to that end
            let fraction = fraction_at_column(mouse.column, bar_width).unwrap_or(
                if mouse.column == 0 { 0.0 } else { 1.0 },
            );
            engine.scrub_to_fraction(fraction, ctx.now_ms);
            ui.needs_render = true;
        }
        MouseEventKind::Up(MouseButton::Left) if engine.is_scrubbing() => {
            engine.end_scrub(true, ctx.now_ms);
            ui.needs_render = true;
        }
        _ => {}
    }

    InputResult::Continue
}
