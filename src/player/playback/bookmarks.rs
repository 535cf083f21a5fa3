//! Named bookmarks into a recording.
//!
//! Bookmarks are kept sorted by time and are independent of the loaded
//! recording: a bookmark is a seek target, nothing more. Persistence is
//! best-effort; a storage payload that cannot be read or parsed results in
//! an empty collection rather than an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::player::state::PlaybackState;

/// A named point in time within a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub time_ms: f64,
    /// Cursor at creation time; informational only
    pub session_index: usize,
    pub chunk_index: usize,
}

/// Errors from bookmark persistence.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("Bookmark storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode bookmarks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Bookmark storage unavailable: {0}")]
    Storage(String),
}

/// Opaque persistence for serialized bookmarks.
pub trait BookmarkStorage {
    /// Stored payload, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, BookmarkError>;
    fn save(&self, payload: &str) -> Result<(), BookmarkError>;
}

/// Bookmarks stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for a recording: `<recording>.bookmarks.json`, placed next
    /// to the recording or inside `directory` when given.
    pub fn for_recording(recording: &Path, directory: Option<&Path>) -> Self {
        let file_name = format!(
            "{}.bookmarks.json",
            recording
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "recording".to_string())
        );
        let path = match directory {
            Some(dir) => dir.join(file_name),
            None => recording.with_file_name(file_name),
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, BookmarkError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, payload: &str) -> Result<(), BookmarkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory storage (for testing and embedding).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payload: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|p| p.clone())
    }
}

impl BookmarkStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, BookmarkError> {
        self.payload
            .lock()
            .map(|p| p.clone())
            .map_err(|_| BookmarkError::Storage("memory storage poisoned".to_string()))
    }

    fn save(&self, payload: &str) -> Result<(), BookmarkError> {
        let mut slot = self
            .payload
            .lock()
            .map_err(|_| BookmarkError::Storage("memory storage poisoned".to_string()))?;
        *slot = Some(payload.to_string());
        Ok(())
    }
}

/// Outcome of loading bookmarks from storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadReport {
    /// Payload parsed; number of bookmarks loaded
    Loaded(usize),
    /// Storage had nothing saved
    Missing,
    /// Payload unreadable or corrupt; collection reset to empty
    Recovered(String),
}

/// Sorted collection of bookmarks.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
    sequence: u64,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmark the current playback position.
    pub fn add(&mut self, name: impl Into<String>, playback: &PlaybackState) -> Bookmark {
        self.sequence += 1;
        let bookmark = Bookmark {
            id: format!("bm-{}-{}", Utc::now().timestamp_millis(), self.sequence),
            name: name.into(),
            time_ms: playback.current_time_ms,
            session_index: playback.cursor.session_index,
            chunk_index: playback.cursor.chunk_index,
        };

        // After any existing bookmark at the same time
        let position = self
            .bookmarks
            .partition_point(|b| b.time_ms <= bookmark.time_ms);
        self.bookmarks.insert(position, bookmark.clone());
        tracing::debug!(id = %bookmark.id, time_ms = bookmark.time_ms, "bookmark added");
        bookmark
    }

    /// Remove a bookmark by id. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        self.bookmarks.len() != before
    }

    pub fn clear(&mut self) {
        self.bookmarks.clear();
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// First bookmark strictly after `time_ms`.
    pub fn next_after(&self, time_ms: f64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.time_ms > time_ms)
    }

    /// Last bookmark strictly before `time_ms`.
    pub fn previous_before(&self, time_ms: f64) -> Option<&Bookmark> {
        self.bookmarks.iter().rev().find(|b| b.time_ms < time_ms)
    }

    /// Last bookmark at or before `time_ms`.
    pub fn last_at_or_before(&self, time_ms: f64) -> Option<&Bookmark> {
        self.bookmarks.iter().rev().find(|b| b.time_ms <= time_ms)
    }

    /// Replace the collection with the stored one.
    ///
    /// Never fails: unreadable or corrupt storage leaves the store empty and
    /// is reported as [`LoadReport::Recovered`].
    pub fn load(&mut self, storage: &dyn BookmarkStorage) -> LoadReport {
        self.bookmarks.clear();

        let payload = match storage.load() {
            Ok(Some(payload)) => payload,
            Ok(None) => return LoadReport::Missing,
            Err(e) => {
                tracing::warn!(error = %e, "could not read bookmarks, starting empty");
                return LoadReport::Recovered(e.to_string());
            }
        };

        match serde_json::from_str::<Vec<Bookmark>>(&payload) {
            Ok(mut bookmarks) => {
                bookmarks.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
                let count = bookmarks.len();
                self.bookmarks = bookmarks;
                LoadReport::Loaded(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "corrupt bookmark data, starting empty");
                LoadReport::Recovered(e.to_string())
            }
        }
    }

    /// Write the collection to storage.
    pub fn save(&self, storage: &dyn BookmarkStorage) -> Result<(), BookmarkError> {
        let payload = serde_json::to_string_pretty(&self.bookmarks)?;
        storage.save(&payload)
    }
}
