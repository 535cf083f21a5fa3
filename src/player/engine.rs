//! Playback engine.
//!
//! Owns the loaded recording, its timeline index, the playback state, the
//! clock and the bookmarks, and writes due output to a [`TerminalView`].
//! All operations are synchronous; the host supplies wall-clock readings in
//! milliseconds and calls [`Engine::tick`] periodically while playing.

use crate::player::playback::{
    advance_to, render_all, Bookmark, BookmarkError, BookmarkStorage, BookmarkStore, Clock,
    LoadReport, Tick, TimelineIndex, DEFAULT_DISPATCH_THRESHOLD_MS,
};
use crate::player::state::{PlaybackState, Speed};
use crate::player::view::TerminalView;
use crate::recording::{Recording, RecordingError};

/// Default text printed before each session's command.
pub const DEFAULT_PROMPT: &str = "rewindtty>";

/// Tunables for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Minimum logical advance before a tick dispatches output
    pub dispatch_threshold_ms: f64,
    /// Prompt shown in front of each session's command
    pub prompt: String,
    /// Initial playback speed
    pub speed: Speed,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            dispatch_threshold_ms: DEFAULT_DISPATCH_THRESHOLD_MS,
            prompt: DEFAULT_PROMPT.to_string(),
            speed: Speed::Normal,
        }
    }
}

/// The timeline playback engine.
pub struct Engine<V: TerminalView> {
    recording: Recording,
    timeline: TimelineIndex,
    state: PlaybackState,
    clock: Clock,
    bookmarks: BookmarkStore,
    view: V,
    prompt: String,
    /// Set while scrubbing: whether playback was running when it began
    scrub_resume: Option<bool>,
}

impl<V: TerminalView> Engine<V> {
    pub fn new(view: V, options: EngineOptions) -> Self {
        let state = PlaybackState {
            speed: options.speed,
            ..PlaybackState::default()
        };
        Self {
            recording: Recording::default(),
            timeline: TimelineIndex::default(),
            state,
            clock: Clock::new(options.dispatch_threshold_ms),
            bookmarks: BookmarkStore::new(),
            view,
            prompt: options.prompt,
            scrub_resume: None,
        }
    }

    /// Replace the recording. Playback stops and returns to time 0.
    ///
    /// Bookmarks are kept; they are time-based seek targets.
    pub fn load_recording(&mut self, recording: Recording) {
        self.clock.pause(&mut self.state);
        self.timeline = TimelineIndex::build(&recording);
        self.recording = recording;
        self.state.total_duration_ms = self.timeline.total_duration_ms();
        self.scrub_resume = None;
        self.reset();
        tracing::info!(
            sessions = self.recording.len(),
            total_ms = self.state.total_duration_ms,
            "recording loaded"
        );
    }

    /// Parse and load a recording.
    ///
    /// On error the previously loaded recording and state are untouched.
    pub fn load_json(&mut self, content: &str) -> Result<(), RecordingError> {
        let recording = Recording::from_json_str(content)?;
        self.load_recording(recording);
        Ok(())
    }

    pub fn play(&mut self, now_ms: f64) -> bool {
        self.clock
            .play(&mut self.state, !self.recording.is_empty(), now_ms)
    }

    pub fn pause(&mut self) {
        self.clock.pause(&mut self.state);
    }

    /// Toggle between playing and paused. Returns whether now playing.
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        if self.state.is_playing {
            self.pause();
            false
        } else {
            self.play(now_ms)
        }
    }

    /// Stop and return to the start of the recording.
    pub fn restart(&mut self) {
        self.pause();
        self.reset();
    }

    pub fn set_speed(&mut self, speed: Speed, now_ms: f64) {
        self.clock.set_speed(&mut self.state, speed, now_ms);
    }

    /// Switch to the next speed in the cycle.
    pub fn cycle_speed(&mut self, now_ms: f64) -> Speed {
        let next = self.state.speed.next();
        self.set_speed(next, now_ms);
        next
    }

    /// Jump to an absolute logical time, clamped to the recording.
    ///
    /// Playback that was running resumes from the new position.
    pub fn seek_to_time_ms(&mut self, time_ms: f64, now_ms: f64) {
        let was_playing = self.state.is_playing;
        self.pause();

        let target = self.state.clamp_time(time_ms);
        self.reset();
        self.dispatch_to(target);
        self.state.current_time_ms = target;
        self.clock.mark_dispatched(target);
        tracing::debug!(target_ms = target, "seek");

        if was_playing {
            self.play(now_ms);
        }
    }

    /// Jump to a fraction (0..=1) of the total duration.
    pub fn seek_to_fraction(&mut self, fraction: f64, now_ms: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek_to_time_ms(fraction * self.state.total_duration_ms, now_ms);
    }

    /// Seek relative to the current position.
    pub fn seek_by_ms(&mut self, delta_ms: f64, now_ms: f64) {
        self.seek_to_time_ms(self.state.current_time_ms + delta_ms, now_ms);
    }

    /// Jump to a bookmark's time. Returns false for an unknown id.
    pub fn seek_to_bookmark(&mut self, id: &str, now_ms: f64) -> bool {
        match self.bookmarks.get(id).map(|b| b.time_ms) {
            Some(time_ms) => {
                self.seek_to_time_ms(time_ms, now_ms);
                true
            }
            None => false,
        }
    }

    /// Jump to the start of a session. Returns false for an unknown index.
    pub fn seek_to_session(&mut self, index: usize, now_ms: f64) -> bool {
        match self.timeline.entries().get(index).map(|e| e.start_time_ms) {
            Some(start_ms) => {
                self.seek_to_time_ms(start_ms, now_ms);
                true
            }
            None => false,
        }
    }

    /// Jump to the next session that starts after the current time.
    pub fn seek_to_next_session(&mut self, now_ms: f64) -> Option<usize> {
        let index = self
            .timeline
            .next_start_after(self.state.current_time_ms)?;
        self.seek_to_session(index, now_ms);
        Some(index)
    }

    /// Jump to the last session that starts before the current time.
    pub fn seek_to_previous_session(&mut self, now_ms: f64) -> Option<usize> {
        let index = self
            .timeline
            .previous_start_before(self.state.current_time_ms)?;
        self.seek_to_session(index, now_ms);
        Some(index)
    }

    /// Start a drag: playback is suspended until [`Engine::end_scrub`].
    pub fn begin_scrub(&mut self) {
        if self.scrub_resume.is_none() {
            self.scrub_resume = Some(self.state.is_playing);
        }
        self.pause();
    }

    /// One step of a drag.
    pub fn scrub_to_fraction(&mut self, fraction: f64, now_ms: f64) {
        self.seek_to_fraction(fraction, now_ms);
    }

    /// End a drag, resuming if `resume` is set and playback was running.
    pub fn end_scrub(&mut self, resume: bool, now_ms: f64) {
        if let Some(was_playing) = self.scrub_resume.take() {
            if was_playing && resume {
                self.play(now_ms);
            }
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub_resume.is_some()
    }

    /// Advance the clock to `now_ms` and write whatever became due.
    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let tick = self.clock.tick(&mut self.state, now_ms);
        match tick {
            Tick::Dispatch(target) | Tick::Ended(target) => self.dispatch_to(target),
            Tick::Idle => {}
        }
        tick
    }

    pub fn add_bookmark(&mut self, name: impl Into<String>) -> Bookmark {
        self.bookmarks.add(name, &self.state)
    }

    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        self.bookmarks.remove(id)
    }

    pub fn clear_bookmarks(&mut self) {
        self.bookmarks.clear();
    }

    pub fn load_bookmarks(&mut self, storage: &dyn BookmarkStorage) -> LoadReport {
        self.bookmarks.load(storage)
    }

    pub fn save_bookmarks(&self, storage: &dyn BookmarkStorage) -> Result<(), BookmarkError> {
        self.bookmarks.save(storage)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn timeline(&self) -> &TimelineIndex {
        &self.timeline
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// Command of the session playing at the current time.
    pub fn active_command(&self) -> Option<&str> {
        self.timeline
            .session_at(self.state.current_time_ms)
            .and_then(|i| self.recording.session(i))
            .map(|s| s.command.as_str())
    }

    fn reset(&mut self) {
        self.state.current_time_ms = 0.0;
        self.state.cursor.reset();
        self.clock.mark_dispatched(0.0);
        if let Err(e) = self.view.clear() {
            tracing::warn!(error = %e, "failed to clear terminal view");
        }
    }

    fn dispatch_to(&mut self, target_ms: f64) {
        let dispatched = advance_to(
            &mut self.state.cursor,
            &self.recording,
            &self.timeline,
            target_ms,
        );
        if dispatched.is_empty() {
            return;
        }
        let text = render_all(&dispatched, &self.prompt);
        if let Err(e) = self.view.write(&text) {
            tracing::warn!(error = %e, "failed to write to terminal view");
        }
    }
}
