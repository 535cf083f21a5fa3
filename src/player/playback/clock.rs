//! Clock controller: maps wall-clock time onto logical playback time.
//!
//! The controller never owns a timer. The host calls [`Clock::tick`] with its
//! current wall-clock reading (milliseconds, any monotonic origin) at a
//! bounded interval while playing.

use crate::player::state::{PlaybackState, Speed};

/// Default minimum logical advance between two dispatches.
pub const DEFAULT_DISPATCH_THRESHOLD_MS: f64 = 50.0;

/// Running/stopped state of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockState {
    Stopped,
    /// Logical time `logical_ms` corresponded to wall time `wall_ms`
    Playing { wall_ms: f64, logical_ms: f64 },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Nothing to dispatch (stopped, or below the hysteresis threshold)
    Idle,
    /// Dispatch everything due up to this logical time
    Dispatch(f64),
    /// End reached: dispatch up to this time and stop
    Ended(f64),
}

/// Play/pause/speed state machine.
#[derive(Debug, Clone)]
pub struct Clock {
    state: ClockState,
    dispatch_threshold_ms: f64,
    last_dispatched_ms: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_DISPATCH_THRESHOLD_MS)
    }
}

impl Clock {
    pub fn new(dispatch_threshold_ms: f64) -> Self {
        Self {
            state: ClockState::Stopped,
            dispatch_threshold_ms: dispatch_threshold_ms.max(0.0),
            last_dispatched_ms: 0.0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, ClockState::Playing { .. })
    }

    pub fn last_dispatched_ms(&self) -> f64 {
        self.last_dispatched_ms
    }

    /// Record that output up to `time_ms` has been dispatched.
    pub fn mark_dispatched(&mut self, time_ms: f64) {
        self.last_dispatched_ms = time_ms;
    }

    /// Start playing from the current logical time.
    ///
    /// Returns false when there is nothing to play: no sessions, or the
    /// position is already at the end.
    pub fn play(&mut self, playback: &mut PlaybackState, has_sessions: bool, now_ms: f64) -> bool {
        if !has_sessions || playback.is_finished() {
            return false;
        }
        self.state = ClockState::Playing {
            wall_ms: now_ms,
            logical_ms: playback.current_time_ms,
        };
        playback.is_playing = true;
        tracing::debug!(at_ms = playback.current_time_ms, "play");
        true
    }

    /// Stop the clock, keeping the current logical time.
    pub fn pause(&mut self, playback: &mut PlaybackState) {
        if self.is_playing() {
            tracing::debug!(at_ms = playback.current_time_ms, "pause");
        }
        self.state = ClockState::Stopped;
        playback.is_playing = false;
    }

    /// Change the speed multiplier without a jump in logical time.
    ///
    /// While playing, time elapsed so far is folded in at the old speed and
    /// the clock is re-anchored at `now_ms`.
    pub fn set_speed(&mut self, playback: &mut PlaybackState, speed: Speed, now_ms: f64) {
        if let ClockState::Playing { .. } = self.state {
            let current = self.logical_time(playback.speed, now_ms);
            playback.current_time_ms = playback.clamp_time(current);
            self.state = ClockState::Playing {
                wall_ms: now_ms,
                logical_ms: playback.current_time_ms,
            };
        }
        playback.speed = speed;
        tracing::debug!(%speed, "speed changed");
    }

    /// Advance logical time to `now_ms`.
    ///
    /// On reaching the end the clock stops and time is clamped to the total.
    pub fn tick(&mut self, playback: &mut PlaybackState, now_ms: f64) -> Tick {
        if !self.is_playing() {
            return Tick::Idle;
        }

        let current = self.logical_time(playback.speed, now_ms);

        if current >= playback.total_duration_ms {
            self.pause(playback);
            playback.current_time_ms = playback.total_duration_ms;
            self.last_dispatched_ms = playback.total_duration_ms;
            tracing::debug!(total_ms = playback.total_duration_ms, "end of recording");
            return Tick::Ended(playback.total_duration_ms);
        }

        playback.current_time_ms = current.max(0.0);

        if playback.current_time_ms - self.last_dispatched_ms > self.dispatch_threshold_ms {
            self.last_dispatched_ms = playback.current_time_ms;
            Tick::Dispatch(playback.current_time_ms)
        } else {
            Tick::Idle
        }
    }

    fn logical_time(&self, speed: Speed, now_ms: f64) -> f64 {
        match self.state {
            ClockState::Stopped => self.last_dispatched_ms,
            ClockState::Playing {
                wall_ms,
                logical_ms,
            } => logical_ms + (now_ms - wall_ms) * speed.multiplier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(total_ms: f64, now_ms: f64) -> (Clock, PlaybackState) {
        let mut clock = Clock::default();
        let mut playback = PlaybackState::new(total_ms);
        assert!(clock.play(&mut playback, true, now_ms));
        (clock, playback)
    }

    #[test]
    fn play_requires_sessions() {
        let mut clock = Clock::default();
        let mut playback = PlaybackState::new(0.0);
        assert!(!clock.play(&mut playback, false, 0.0));
        assert!(!playback.is_playing);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn play_refuses_at_end() {
        let mut clock = Clock::default();
        let mut playback = PlaybackState::new(1000.0);
        playback.current_time_ms = 1000.0;
        assert!(!clock.play(&mut playback, true, 0.0));
    }

    #[test]
    fn tick_scales_elapsed_time() {
        let (mut clock, mut playback) = playing(10_000.0, 1_000.0);

        assert_eq!(clock.tick(&mut playback, 1_100.0), Tick::Dispatch(100.0));
        assert_eq!(playback.current_time_ms, 100.0);
    }

    #[test]
    fn tick_below_threshold_is_idle() {
        let (mut clock, mut playback) = playing(10_000.0, 0.0);

        assert_eq!(clock.tick(&mut playback, 30.0), Tick::Idle);
        assert_eq!(playback.current_time_ms, 30.0);
        assert_eq!(clock.tick(&mut playback, 60.0), Tick::Dispatch(60.0));
        assert_eq!(clock.last_dispatched_ms(), 60.0);
    }

    #[test]
    fn pause_preserves_time_and_resume_continues() {
        let (mut clock, mut playback) = playing(10_000.0, 0.0);
        clock.tick(&mut playback, 400.0);
        clock.pause(&mut playback);

        assert!(!playback.is_playing);
        assert_eq!(clock.tick(&mut playback, 5_000.0), Tick::Idle);
        assert_eq!(playback.current_time_ms, 400.0);

        assert!(clock.play(&mut playback, true, 9_000.0));
        assert_eq!(clock.tick(&mut playback, 9_100.0), Tick::Dispatch(500.0));
    }

    #[test]
    fn speed_change_does_not_jump() {
        let (mut clock, mut playback) = playing(100_000.0, 0.0);
        clock.tick(&mut playback, 1_000.0);
        assert_eq!(playback.current_time_ms, 1_000.0);

        clock.set_speed(&mut playback, Speed::Triple, 1_050.0);
        assert_eq!(playback.current_time_ms, 1_050.0);

        // One 100ms tick later at 3x
        clock.tick(&mut playback, 1_150.0);
        assert_eq!(playback.current_time_ms, 1_350.0);
        assert!(playback.current_time_ms - 1_050.0 <= 100.0 * 3.0);
    }

    #[test]
    fn speed_change_while_stopped_only_sets_multiplier() {
        let mut clock = Clock::default();
        let mut playback = PlaybackState::new(5_000.0);
        playback.current_time_ms = 700.0;

        clock.set_speed(&mut playback, Speed::Half, 123.0);

        assert_eq!(playback.speed, Speed::Half);
        assert_eq!(playback.current_time_ms, 700.0);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn end_of_recording_is_terminal() {
        let (mut clock, mut playback) = playing(1_000.0, 0.0);

        assert_eq!(clock.tick(&mut playback, 1_200.0), Tick::Ended(1_000.0));
        assert!(!playback.is_playing);
        assert_eq!(playback.current_time_ms, 1_000.0);
        assert_eq!(clock.tick(&mut playback, 2_000.0), Tick::Idle);
        assert_eq!(playback.current_time_ms, 1_000.0);
    }

    #[test]
    fn double_speed_reaches_end_sooner() {
        let mut clock = Clock::default();
        let mut playback = PlaybackState::new(1_000.0);
        playback.speed = Speed::Double;
        clock.play(&mut playback, true, 0.0);

        assert_eq!(clock.tick(&mut playback, 400.0), Tick::Dispatch(800.0));
        assert_eq!(clock.tick(&mut playback, 500.0), Tick::Ended(1_000.0));
    }
}
