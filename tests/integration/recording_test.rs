//! Integration tests for loading recordings

use super::helpers::{fixture_str, fixtures_dir, temp_fixture};
use rewindtty::Recording;

#[test]
fn loads_sample_fixture() {
    let recording = Recording::load(fixtures_dir().join("sample.json")).unwrap();

    assert_eq!(recording.len(), 3);
    assert_eq!(recording.chunk_count(), 4);
    assert_eq!(recording.sessions()[0].command, "ls");
    assert_eq!(recording.sessions()[1].command, "cat missing.txt");
}

#[test]
fn camel_case_times_are_accepted() {
    let recording = Recording::from_json_str(&fixture_str("sample.json")).unwrap();
    let session = &recording.sessions()[1];
    assert_eq!(session.start_time, 1700000002.0);
    assert_eq!(session.end_time, 1700000003.0);
}

#[test]
fn missing_size_is_derived_from_data() {
    let recording = Recording::from_json_str(&fixture_str("sample.json")).unwrap();
    let chunk = &recording.sessions()[1].chunks[0];
    assert_eq!(chunk.size, None);
    assert_eq!(chunk.size(), chunk.data.len());
}

#[test]
fn empty_array_is_a_valid_recording() {
    let recording = Recording::load(fixtures_dir().join("empty.json")).unwrap();
    assert!(recording.is_empty());
}

#[test]
fn malformed_file_is_rejected() {
    let err = Recording::load(fixtures_dir().join("malformed.json")).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn missing_file_reports_path() {
    let err = Recording::load("/nonexistent/rec.json").unwrap_err();
    assert!(!err.is_malformed());
    assert!(err.to_string().contains("/nonexistent/rec.json"));
}

#[test]
fn json_output_reloads() {
    let (_temp_dir, path) = temp_fixture("sample.json");
    let recording = Recording::load(&path).unwrap();

    std::fs::write(&path, recording.to_json_string().unwrap()).unwrap();
    assert_eq!(Recording::load(&path).unwrap(), recording);
}
