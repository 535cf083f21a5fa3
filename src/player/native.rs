//! Native terminal player.
//!
//! Replays a recording in the user's terminal: output goes to a scroll
//! region at the top of the screen while the bottom three rows hold the
//! separator, the progress bar and the status bar.

use std::io::{self, Write};
use std::panic;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

use crate::player::engine::{Engine, EngineOptions};
use crate::player::input::{handle_event, InputContext};
use crate::player::playback::{FileStorage, LoadReport, Tick};
use crate::player::render::{
    render_help, render_progress_bar, render_separator_line, render_status_bar, StatusInfo,
};
use crate::player::state::{InputResult, UiState};
use crate::player::view::StdoutView;
use crate::recording::Recording;

/// How a playback session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackResult {
    /// The user quit; carries the final position in milliseconds
    Quit { position_ms: f64 },
    /// The recording had no sessions
    Empty,
}

/// Everything the player needs besides the recording itself.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub engine: EngineOptions,
    /// Poll timeout between clock ticks
    pub tick_interval: Duration,
    /// Arrow-key seek step in milliseconds
    pub seek_step_ms: f64,
    /// Position to start from in milliseconds
    pub start_ms: f64,
    /// Where bookmarks are loaded from and saved to
    pub storage: FileStorage,
}

/// Restores the terminal when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(content_rows: u16) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        set_scroll_region(&mut stdout, content_rows)?;
        Ok(guard)
    }

    fn restore() {
        let mut stdout = io::stdout();
        // Reset scroll region before leaving
        let _ = write!(stdout, "\x1b[r");
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Self::restore();
    }
}

/// Chain a panic hook that puts the terminal back before the message prints.
fn install_panic_hook() {
    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        TerminalGuard::restore();
        original(info);
    }));
}

fn set_scroll_region(stdout: &mut io::Stdout, content_rows: u16) -> io::Result<()> {
    write!(stdout, "\x1b[1;{}r", content_rows)?;
    stdout.flush()
}

/// Milliseconds elapsed since the player started.
fn now_ms(origin: Instant) -> f64 {
    origin.elapsed().as_secs_f64() * 1000.0
}

/// Load a recording and play it in the terminal until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_session(path: &Path, options: PlayerOptions) -> Result<PlaybackResult> {
    let recording = Recording::load(path)?;
    if recording.is_empty() {
        tracing::info!(path = %path.display(), "recording has no sessions");
        return Ok(PlaybackResult::Empty);
    }

    let view = StdoutView::new().translate_newlines(true);
    let mut engine = Engine::new(view, options.engine.clone());
    engine.load_recording(recording);

    match engine.load_bookmarks(&options.storage) {
        LoadReport::Loaded(count) => {
            tracing::info!(count, path = %options.storage.path().display(), "loaded bookmarks")
        }
        LoadReport::Missing => {}
        LoadReport::Recovered(reason) => {
            tracing::warn!(%reason, "discarded unreadable bookmarks")
        }
    }

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
    let mut ui = UiState::new(cols, rows);

    install_panic_hook();
    let _guard = TerminalGuard::enter(ui.content_rows())?;
    let mut stdout = io::stdout();

    let origin = Instant::now();
    engine.seek_to_time_ms(options.start_ms, now_ms(origin));
    engine.play(now_ms(origin));

    let result = run_loop(&mut engine, &mut ui, &mut stdout, &options, origin);

    if let Err(e) = engine.save_bookmarks(&options.storage) {
        tracing::warn!(error = %e, "failed to save bookmarks");
    }

    result
}

#[cfg(not(tarpaulin_include))]
fn run_loop(
    engine: &mut Engine<StdoutView>,
    ui: &mut UiState,
    stdout: &mut io::Stdout,
    options: &PlayerOptions,
    origin: Instant,
) -> Result<PlaybackResult> {
    loop {
        if event::poll(options.tick_interval)? {
            let ctx = InputContext {
                now_ms: now_ms(origin),
                seek_step_ms: options.seek_step_ms,
            };
            match handle_event(event::read()?, engine, ui, ctx) {
                InputResult::Quit => {
                    return Ok(PlaybackResult::Quit {
                        position_ms: engine.state().current_time_ms,
                    });
                }
                InputResult::BookmarksChanged => {
                    if let Err(e) = engine.save_bookmarks(&options.storage) {
                        tracing::warn!(error = %e, "failed to save bookmarks");
                        ui.set_message("Could not save bookmarks");
                    }
                }
                InputResult::Continue => {}
            }
        }

        if ui.show_help {
            if ui.needs_render {
                render_help(stdout, ui.term_cols, ui.term_rows)?;
                ui.needs_render = false;
            }
            continue;
        }

        if ui.needs_replay {
            set_scroll_region(stdout, ui.content_rows())?;
            let current = engine.state().current_time_ms;
            engine.seek_to_time_ms(current, now_ms(origin));
            ui.needs_replay = false;
            ui.needs_render = true;
        }

        match engine.tick(now_ms(origin)) {
            Tick::Dispatch(_) => ui.needs_render = true,
            Tick::Ended(_) => ui.set_message("End of recording"),
            // The clock still moved; keep the progress bar current
            Tick::Idle if engine.state().is_playing => ui.needs_render = true,
            Tick::Idle => {}
        }

        if ui.needs_render {
            render_chrome(engine, ui, stdout)?;
            ui.needs_render = false;
        }
    }
}

/// Draw the three chrome rows without disturbing the output cursor.
#[cfg(not(tarpaulin_include))]
fn render_chrome(
    engine: &Engine<StdoutView>,
    ui: &UiState,
    stdout: &mut io::Stdout,
) -> Result<()> {
    if ui.term_rows < UiState::STATUS_LINES + 1 {
        return Ok(());
    }
    let state = engine.state();

    // Save cursor
    write!(stdout, "\x1b7")?;
    render_separator_line(stdout, ui.term_cols, ui.term_rows - 3)?;
    render_progress_bar(
        stdout,
        ui.term_cols,
        ui.progress_row(),
        state.current_time_ms,
        state.total_duration_ms,
        engine.timeline().entries(),
        engine.bookmarks().as_slice(),
    )?;
    let info = StatusInfo {
        playing: state.is_playing,
        speed: state.speed,
        command: engine.active_command(),
        bookmark_count: engine.bookmarks().len(),
        message: ui.message.as_deref(),
    };
    render_status_bar(stdout, ui.term_cols, ui.term_rows - 1, &info)?;
    // Restore cursor
    write!(stdout, "\x1b8")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_monotonic() {
        let origin = Instant::now();
        let a = now_ms(origin);
        let b = now_ms(origin);
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn playback_result_variants() {
        assert_ne!(
            PlaybackResult::Quit { position_ms: 0.0 },
            PlaybackResult::Empty
        );
    }
}
