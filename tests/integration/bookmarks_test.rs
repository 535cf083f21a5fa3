//! Integration tests for bookmark persistence

use std::fs;

use super::helpers::{fixture_str, temp_fixture};
use rewindtty::player::playback::{FileStorage, LoadReport};
use rewindtty::{Engine, EngineOptions, MemoryView};

fn engine() -> Engine<MemoryView> {
    let mut engine = Engine::new(MemoryView::new(), EngineOptions::default());
    engine.load_json(&fixture_str("sample.json")).unwrap();
    engine
}

#[test]
fn bookmarks_survive_save_and_load() {
    let (temp_dir, path) = temp_fixture("sample.json");
    let storage = FileStorage::for_recording(&path, None);
    assert_eq!(
        storage.path(),
        temp_dir.path().join("sample.json.bookmarks.json")
    );

    let mut first = engine();
    for time_ms in [3_200.0, 500.0, 2_100.0] {
        first.seek_to_time_ms(time_ms, 0.0);
        first.add_bookmark(format!("at {}", time_ms));
    }
    first.save_bookmarks(&storage).unwrap();

    let mut second = engine();
    assert_eq!(second.load_bookmarks(&storage), LoadReport::Loaded(3));
    let times: Vec<f64> = second.bookmarks().iter().map(|b| b.time_ms).collect();
    assert_eq!(times, vec![500.0, 2_100.0, 3_200.0]);

    let middle = second.bookmarks().as_slice()[1].clone();
    assert_eq!(middle.session_index, 1);
    assert!(second.seek_to_bookmark(&middle.id, 0.0));
    assert_eq!(second.active_command(), Some("cat missing.txt"));
}

#[test]
fn missing_file_loads_nothing() {
    let (_temp_dir, path) = temp_fixture("sample.json");
    let storage = FileStorage::for_recording(&path, None);

    let mut engine = engine();
    assert_eq!(engine.load_bookmarks(&storage), LoadReport::Missing);
    assert!(engine.bookmarks().is_empty());
}

#[test]
fn corrupt_file_is_recovered_as_empty() {
    let (_temp_dir, path) = temp_fixture("sample.json");
    let storage = FileStorage::for_recording(&path, None);
    fs::write(storage.path(), "{ not json").unwrap();

    let mut engine = engine();
    engine.seek_to_time_ms(100.0, 0.0);
    engine.add_bookmark("stale");

    assert!(matches!(
        engine.load_bookmarks(&storage),
        LoadReport::Recovered(_)
    ));
    assert!(engine.bookmarks().is_empty());
}

#[test]
fn directory_override_is_used() {
    let (_temp_dir, path) = temp_fixture("sample.json");
    let marks = tempfile::TempDir::new().unwrap();
    let storage = FileStorage::for_recording(&path, Some(marks.path()));

    let mut engine = engine();
    engine.add_bookmark("start");
    engine.save_bookmarks(&storage).unwrap();

    assert!(marks.path().join("sample.json.bookmarks.json").exists());
    assert!(!path.with_file_name("sample.json.bookmarks.json").exists());
}
