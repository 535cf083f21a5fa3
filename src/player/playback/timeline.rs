//! Timeline index for a loaded recording.
//!
//! Each session's clock restarts at zero, so chunk times are only meaningful
//! once offset by the cumulative length of all prior sessions. The index
//! computes those offsets once per recording.

use crate::recording::Recording;

/// Time coordinates of one session within the whole recording.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub session_index: usize,
    pub command: String,
    /// Cumulative offset of prior sessions in milliseconds
    pub start_time_ms: f64,
    /// `start_time_ms / total_duration_ms`, 0 for an empty timeline
    pub position_fraction: f64,
}

/// Per-session start offsets and the total recording length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineIndex {
    entries: Vec<TimelineEntry>,
    total_duration_ms: f64,
}

impl TimelineIndex {
    /// Build the index with a single forward pass over the sessions.
    pub fn build(recording: &Recording) -> Self {
        let total_duration_ms: f64 = recording.sessions().iter().map(|s| s.duration_ms()).sum();

        let mut entries = Vec::with_capacity(recording.len());
        let mut cumulative_ms = 0.0f64;

        for (session_index, session) in recording.sessions().iter().enumerate() {
            let position_fraction = if total_duration_ms > 0.0 {
                cumulative_ms / total_duration_ms
            } else {
                0.0
            };
            entries.push(TimelineEntry {
                session_index,
                command: session.command.clone(),
                start_time_ms: cumulative_ms,
                position_fraction,
            });
            cumulative_ms += session.duration_ms();
        }

        Self {
            entries,
            total_duration_ms: cumulative_ms,
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    /// Cumulative start of a session, or the total length past the last one.
    pub fn session_start_ms(&self, session_index: usize) -> f64 {
        self.entries
            .get(session_index)
            .map(|e| e.start_time_ms)
            .unwrap_or(self.total_duration_ms)
    }

    /// Index of the session active at `time_ms`.
    ///
    /// That is the last session whose start is at or before the given time.
    pub fn session_at(&self, time_ms: f64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let after = self
            .entries
            .partition_point(|entry| entry.start_time_ms <= time_ms);
        Some(after.saturating_sub(1))
    }

    /// First session starting strictly after `time_ms`.
    pub fn next_start_after(&self, time_ms: f64) -> Option<usize> {
        let index = self
            .entries
            .partition_point(|entry| entry.start_time_ms <= time_ms);
        (index < self.entries.len()).then_some(index)
    }

    /// Last session starting strictly before `time_ms`.
    pub fn previous_start_before(&self, time_ms: f64) -> Option<usize> {
        self.entries
            .partition_point(|entry| entry.start_time_ms < time_ms)
            .checked_sub(1)
    }
}
