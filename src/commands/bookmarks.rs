//! Bookmarks subcommands handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use rewindtty::player::playback::{Bookmark, BookmarkStorage, LoadReport};
use rewindtty::player::render::format_time;
use rewindtty::{Config, Engine, MemoryView, Recording};

use super::{bookmark_storage, secs_to_ms};

/// One line of `bookmarks list` output.
pub fn format_bookmark(bookmark: &Bookmark, recording: &Recording) -> String {
    let command = recording
        .session(bookmark.session_index)
        .map(|s| s.command.as_str())
        .unwrap_or("-");
    format!(
        "{}  {}  {}  ({})",
        bookmark.id,
        format_time(bookmark.time_ms),
        bookmark.name,
        command
    )
}

fn open_engine(file: &Path, config: &Config) -> Result<Engine<MemoryView>> {
    let recording = Recording::load(file)
        .with_context(|| format!("Failed to load recording: {}", file.display()))?;
    let mut engine = Engine::new(MemoryView::new(), config.playback.engine_options());
    engine.load_recording(recording);
    Ok(engine)
}

fn load_into(engine: &mut Engine<MemoryView>, storage: &dyn BookmarkStorage) {
    if let LoadReport::Recovered(reason) = engine.load_bookmarks(storage) {
        eprintln!("Warning: existing bookmarks were unreadable ({})", reason);
    }
}

/// Print all bookmarks in time order.
#[cfg(not(tarpaulin_include))]
pub fn handle_list(file: &Path) -> Result<()> {
    let config = Config::load()?;
    let mut engine = open_engine(file, &config)?;
    let storage = bookmark_storage(&config, file);
    load_into(&mut engine, &storage);

    if engine.bookmarks().is_empty() {
        println!("No bookmarks.");
        return Ok(());
    }
    for bookmark in engine.bookmarks().iter() {
        println!("{}", format_bookmark(bookmark, engine.recording()));
    }
    Ok(())
}

/// Add a bookmark at `at` seconds.
#[cfg(not(tarpaulin_include))]
pub fn handle_add(file: &Path, name: &str, at: f64) -> Result<()> {
    let config = Config::load()?;
    let mut engine = open_engine(file, &config)?;
    let storage = bookmark_storage(&config, file);
    load_into(&mut engine, &storage);

    engine.seek_to_time_ms(secs_to_ms(at), 0.0);
    let bookmark = engine.add_bookmark(name);
    engine
        .save_bookmarks(&storage)
        .with_context(|| format!("Failed to save {}", storage.path().display()))?;

    println!("Added {}", format_bookmark(&bookmark, engine.recording()));
    Ok(())
}

/// Remove a bookmark by id.
#[cfg(not(tarpaulin_include))]
pub fn handle_remove(file: &Path, id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut engine = open_engine(file, &config)?;
    let storage = bookmark_storage(&config, file);
    load_into(&mut engine, &storage);

    if !engine.remove_bookmark(id) {
        bail!("No bookmark with id {}", id);
    }
    engine
        .save_bookmarks(&storage)
        .with_context(|| format!("Failed to save {}", storage.path().display()))?;

    println!("Removed {}", id);
    Ok(())
}

/// Remove every bookmark of the recording.
#[cfg(not(tarpaulin_include))]
pub fn handle_clear(file: &Path) -> Result<()> {
    let config = Config::load()?;
    let mut engine = open_engine(file, &config)?;
    let storage = bookmark_storage(&config, file);
    load_into(&mut engine, &storage);

    let count = engine.bookmarks().len();
    engine.clear_bookmarks();
    engine
        .save_bookmarks(&storage)
        .with_context(|| format!("Failed to save {}", storage.path().display()))?;

    println!("Removed {} bookmark(s)", count);
    Ok(())
}
