//! Recording load errors.

use std::path::PathBuf;

/// Errors that can occur while loading a recording.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("Failed to read recording {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recording: {reason}")]
    Malformed { reason: String },

    #[error("Malformed recording: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecordingError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Whether the input was read but structurally invalid.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Json(_))
    }
}
