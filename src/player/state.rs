//! Player state management
//!
//! Contains the central `PlaybackState` value that the engine owns and hands
//! out for rendering, as well as shared types used across player modules.

use std::fmt;

use crate::player::playback::Cursor;

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// The bookmark set changed and should be persisted
    BookmarksChanged,
    /// Exit the player
    Quit,
}

/// Playback speed multiplier.
///
/// Speeds form a closed cycle: 0.5x → 1x → 1.5x → 2x → 3x → 0.5x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Speed {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
    Triple,
}

impl Speed {
    /// All speeds in cycle order.
    pub const ALL: [Speed; 5] = [
        Speed::Half,
        Speed::Normal,
        Speed::OneAndHalf,
        Speed::Double,
        Speed::Triple,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Speed::Half => 0.5,
            Speed::Normal => 1.0,
            Speed::OneAndHalf => 1.5,
            Speed::Double => 2.0,
            Speed::Triple => 3.0,
        }
    }

    /// Next speed in the cycle, wrapping from 3x back to 0.5x.
    pub fn next(self) -> Self {
        match self {
            Speed::Half => Speed::Normal,
            Speed::Normal => Speed::OneAndHalf,
            Speed::OneAndHalf => Speed::Double,
            Speed::Double => Speed::Triple,
            Speed::Triple => Speed::Half,
        }
    }

    /// Exact lookup of a multiplier; anything outside the cycle is `None`.
    pub fn from_multiplier(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.multiplier() - value).abs() < f64::EPSILON)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

/// Central playback state.
///
/// `current_time_ms` is the logical clock; progress and the active command
/// are derived from it. After every engine operation it lies within
/// `0..=total_duration_ms`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    /// Whether the clock is running
    pub is_playing: bool,
    /// Logical playback position in milliseconds
    pub current_time_ms: f64,
    /// Length of the loaded recording in milliseconds
    pub total_duration_ms: f64,
    /// Playback speed multiplier
    pub speed: Speed,
    /// Position of the next chunk to dispatch
    pub cursor: Cursor,
}

impl PlaybackState {
    /// Fresh state for a recording of the given length.
    pub fn new(total_duration_ms: f64) -> Self {
        Self {
            total_duration_ms,
            ..Self::default()
        }
    }

    /// Progress through the recording in `0.0..=1.0`.
    ///
    /// An empty recording reports full progress, it is finished immediately.
    pub fn progress(&self) -> f64 {
        if self.total_duration_ms > 0.0 {
            (self.current_time_ms / self.total_duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Whether the logical clock has reached the end of the recording.
    pub fn is_finished(&self) -> bool {
        self.current_time_ms >= self.total_duration_ms
    }

    /// Clamp a seek target into the valid range; NaN maps to 0.
    pub fn clamp_time(&self, time_ms: f64) -> f64 {
        if time_ms.is_nan() {
            return 0.0;
        }
        time_ms.clamp(0.0, self.total_duration_ms)
    }
}

/// Terminal-side state of the native player.
///
/// Everything about playback itself lives in [`PlaybackState`]; this only
/// tracks the screen layout and overlays.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,
    /// Transient message shown in the status bar
    pub message: Option<String>,
    /// True when the chrome needs to be redrawn
    pub needs_render: bool,
    /// True when the output area must be replayed (after resize or overlay)
    pub needs_replay: bool,
}

impl UiState {
    /// Number of status/chrome lines (separator + progress + status bar)
    pub const STATUS_LINES: u16 = 3;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            term_cols,
            term_rows,
            message: None,
            needs_render: true,
            needs_replay: false,
        }
    }

    /// Rows available for replayed output.
    pub fn content_rows(&self) -> u16 {
        self.term_rows.saturating_sub(Self::STATUS_LINES).max(1)
    }

    /// Row of the progress bar (0-indexed).
    pub fn progress_row(&self) -> u16 {
        self.term_rows.saturating_sub(2)
    }

    /// Width of the progress bar track.
    pub fn progress_bar_width(&self) -> usize {
        (self.term_cols as usize).saturating_sub(14)
    }

    /// Handle terminal resize event.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.needs_render = true;
        self.needs_replay = true;
    }

    /// Toggle help overlay visibility.
    ///
    /// Closing the overlay replays the output it covered.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if !self.show_help {
            self.needs_replay = true;
        }
        self.needs_render = true;
    }

    /// Show a message in the status bar until the next one.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.needs_render = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_correct_defaults() {
        let state = PlaybackState::new(3000.0);

        assert!(!state.is_playing);
        assert_eq!(state.current_time_ms, 0.0);
        assert_eq!(state.total_duration_ms, 3000.0);
        assert_eq!(state.speed, Speed::Normal);
        assert_eq!(state.cursor, Cursor::default());
    }

    #[test]
    fn speed_cycles_through_all_values() {
        let mut speed = Speed::Half;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(speed.multiplier());
            speed = speed.next();
        }
        assert_eq!(seen, vec![0.5, 1.0, 1.5, 2.0, 3.0]);
        assert_eq!(speed, Speed::Half);
    }

    #[test]
    fn speed_from_multiplier_rejects_unknown_values() {
        assert_eq!(Speed::from_multiplier(2.0), Some(Speed::Double));
        assert_eq!(Speed::from_multiplier(0.5), Some(Speed::Half));
        assert_eq!(Speed::from_multiplier(4.0), None);
    }

    #[test]
    fn speed_display() {
        assert_eq!(Speed::OneAndHalf.to_string(), "1.5x");
        assert_eq!(Speed::Triple.to_string(), "3x");
    }

    #[test]
    fn progress_is_fraction_of_total() {
        let mut state = PlaybackState::new(4000.0);
        state.current_time_ms = 1000.0;
        assert_eq!(state.progress(), 0.25);
    }

    #[test]
    fn empty_recording_is_finished() {
        let state = PlaybackState::new(0.0);
        assert_eq!(state.progress(), 1.0);
        assert!(state.is_finished());
    }

    #[test]
    fn clamp_time_handles_out_of_range_targets() {
        let state = PlaybackState::new(3000.0);
        assert_eq!(state.clamp_time(-5.0), 0.0);
        assert_eq!(state.clamp_time(9999.0), 3000.0);
        assert_eq!(state.clamp_time(f64::NAN), 0.0);
        assert_eq!(state.clamp_time(1200.0), 1200.0);
    }

    #[test]
    fn input_result_enum_variants() {
        assert_eq!(InputResult::Continue, InputResult::Continue);
        assert_ne!(InputResult::Quit, InputResult::Continue);
        assert_ne!(InputResult::BookmarksChanged, InputResult::Quit);
    }

    #[test]
    fn ui_layout_reserves_status_lines() {
        let ui = UiState::new(80, 27);
        assert_eq!(ui.content_rows(), 24);
        assert_eq!(ui.progress_row(), 25);
        assert_eq!(ui.progress_bar_width(), 66);
    }

    #[test]
    fn ui_layout_handles_tiny_terminal() {
        let ui = UiState::new(10, 2);
        assert_eq!(ui.content_rows(), 1);
        assert_eq!(ui.progress_bar_width(), 0);
    }

    #[test]
    fn resize_requests_replay() {
        let mut ui = UiState::new(80, 27);
        ui.needs_render = false;
        ui.handle_resize(120, 40);
        assert_eq!(ui.term_cols, 120);
        assert_eq!(ui.content_rows(), 37);
        assert!(ui.needs_render);
        assert!(ui.needs_replay);
    }

    #[test]
    fn closing_help_requests_replay() {
        let mut ui = UiState::new(80, 27);
        ui.toggle_help();
        assert!(ui.show_help);
        assert!(!ui.needs_replay);
        ui.toggle_help();
        assert!(!ui.show_help);
        assert!(ui.needs_replay);
    }
}
