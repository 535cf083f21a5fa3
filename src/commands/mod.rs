//! Subcommand handlers

pub mod analyze;
pub mod bookmarks;
pub mod config;
pub mod dump;
pub mod play;
pub mod upload;

use std::path::Path;

use rewindtty::player::playback::FileStorage;
use rewindtty::Config;

/// Bookmark storage for a recording, honoring `[bookmarks] directory`.
pub fn bookmark_storage(config: &Config, recording: &Path) -> FileStorage {
    FileStorage::for_recording(recording, config.bookmarks.directory.as_deref())
}

/// Convert a user-supplied position in seconds to milliseconds.
pub fn secs_to_ms(seconds: f64) -> f64 {
    seconds * 1000.0
}
