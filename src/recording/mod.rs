//! Recording model and JSON loader
//!
//! A recording is an ordered list of sessions, one per recorded shell
//! command. Each session carries its output as timestamped chunks whose
//! `time` is relative to the start of that session.
//!
//! The on-disk format is a JSON array:
//!
//! ```json
//! [
//!   { "command": "ls", "start_time": 1700000000.0, "end_time": 1700000001.5,
//!     "duration": 1.5,
//!     "chunks": [ { "time": 0.0, "size": 6, "data": "a.txt\n" } ] }
//! ]
//! ```
//!
//! Loading performs shape checks only. Chunk ordering inside a session is
//! trusted as written by the recorder.

mod error;

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::RecordingError;

/// One timestamped fragment of a session's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Offset in seconds from the start of the owning session
    pub time: f64,
    /// Byte size as reported by the recorder (absent in some files)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Raw output text
    pub data: String,
}

impl Chunk {
    pub fn new(time: f64, data: impl Into<String>) -> Self {
        let data = data.into();
        Self {
            time,
            size: Some(data.len()),
            data,
        }
    }

    /// Reported size, falling back to the byte length of `data`.
    pub fn size(&self) -> usize {
        self.size.unwrap_or(self.data.len())
    }

    /// Offset from session start in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.time * 1000.0
    }
}

/// One recorded command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub command: String,
    /// Wall-clock start (unix seconds) as captured
    #[serde(default, alias = "startTime")]
    pub start_time: f64,
    /// Wall-clock end (unix seconds) as captured
    #[serde(default, alias = "endTime")]
    pub end_time: f64,
    /// Length of the session in seconds
    pub duration: f64,
    pub chunks: Vec<Chunk>,
}

impl Session {
    pub fn new(command: impl Into<String>, duration: f64, chunks: Vec<Chunk>) -> Self {
        Self {
            command: command.into(),
            start_time: 0.0,
            end_time: duration,
            duration,
            chunks,
        }
    }

    /// Session length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration * 1000.0
    }

    fn validate(&self, index: usize) -> Result<(), RecordingError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(RecordingError::malformed(format!(
                "session {} ({:?}) has invalid duration {}",
                index, self.command, self.duration
            )));
        }
        for (chunk_index, chunk) in self.chunks.iter().enumerate() {
            if !chunk.time.is_finite() || chunk.time < 0.0 {
                return Err(RecordingError::malformed(format!(
                    "chunk {} of session {} has invalid time {}",
                    chunk_index, index, chunk.time
                )));
            }
        }
        Ok(())
    }
}

/// An ordered sequence of sessions, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    sessions: Vec<Session>,
}

impl Recording {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Load a recording from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recording = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            sessions = recording.len(),
            "loaded recording"
        );
        Ok(recording)
    }

    /// Parse a recording from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RecordingError> {
        let recording: Recording = serde_json::from_reader(reader)?;
        recording.validate()?;
        Ok(recording)
    }

    /// Parse a recording from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, RecordingError> {
        if content.trim().is_empty() {
            return Err(RecordingError::malformed("file is empty"));
        }
        let recording: Recording = serde_json::from_str(content)?;
        recording.validate()?;
        Ok(recording)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), RecordingError> {
        self.sessions
            .iter()
            .enumerate()
            .try_for_each(|(i, session)| session.validate(i))
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Total number of chunks across all sessions.
    pub fn chunk_count(&self) -> usize {
        self.sessions.iter().map(|s| s.chunks.len()).sum()
    }
}
