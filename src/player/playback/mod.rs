//! Playback logic for the player.
//!
//! This module handles the timeline index, chunk dispatch and seeking,
//! the play/pause/speed clock, and bookmarks.

mod bookmarks;
mod clock;
mod cursor;
mod timeline;

pub use bookmarks::{
    Bookmark, BookmarkError, BookmarkStorage, BookmarkStore, FileStorage, LoadReport,
    MemoryStorage,
};
pub use clock::{Clock, ClockState, Tick, DEFAULT_DISPATCH_THRESHOLD_MS};
pub use cursor::{advance_to, render_all, seek_to, Cursor, Dispatch};
pub use timeline::{TimelineEntry, TimelineIndex};
