//! Integration tests for the playback engine

use super::helpers::fixture_str;
use rewindtty::player::playback::Tick;
use rewindtty::{Engine, EngineOptions, MemoryView, Speed};

const LS_OUTPUT: &str = "\r\nrewindtty> ls\r\na.txt\nb.txt\n";
const CAT_OUTPUT: &str =
    "\r\nrewindtty> cat missing.txt\r\ncat: missing.txt: No such file or directory\n";

fn sample_engine() -> Engine<MemoryView> {
    let mut engine = Engine::new(MemoryView::new(), EngineOptions::default());
    engine.load_json(&fixture_str("sample.json")).unwrap();
    engine
}

#[test]
fn total_duration_is_sum_of_sessions() {
    let engine = sample_engine();
    assert_eq!(engine.state().total_duration_ms, 4_500.0);
    assert_eq!(engine.timeline().len(), 3);
    assert_eq!(engine.timeline().session_start_ms(2), 3_000.0);
}

#[test]
fn seek_renders_output_due_at_target() {
    let mut engine = sample_engine();
    engine.seek_to_time_ms(2_500.0, 0.0);

    assert_eq!(engine.view().contents(), format!("{}{}", LS_OUTPUT, CAT_OUTPUT));
    assert_eq!(engine.active_command(), Some("cat missing.txt"));
    assert_eq!(engine.state().cursor.session_index, 1);
    assert_eq!(engine.state().cursor.chunk_index, 1);
}

#[test]
fn seek_is_idempotent() {
    let mut engine = sample_engine();
    engine.seek_to_time_ms(4_000.0, 0.0);
    engine.seek_to_time_ms(1_200.0, 0.0);
    let first = (engine.view().contents().to_string(), engine.state().cursor);

    engine.seek_to_time_ms(300.0, 0.0);
    engine.seek_to_time_ms(1_200.0, 0.0);
    let second = (engine.view().contents().to_string(), engine.state().cursor);

    assert_eq!(first, second);
}

#[test]
fn ticking_matches_seeking() {
    let mut ticked = sample_engine();
    ticked.play(0.0);
    let mut now = 0.0;
    while ticked.state().is_playing {
        now += 100.0;
        ticked.tick(now);
    }

    let mut seeked = sample_engine();
    seeked.seek_to_time_ms(4_500.0, 0.0);

    assert_eq!(ticked.view().contents(), seeked.view().contents());
    assert_eq!(ticked.state().current_time_ms, 4_500.0);
}

#[test]
fn playback_stops_at_end() {
    let mut engine = sample_engine();
    engine.play(0.0);

    assert_eq!(engine.tick(10_000.0), Tick::Ended(4_500.0));
    assert!(!engine.state().is_playing);
    assert_eq!(engine.progress(), 1.0);

    // Finished: nothing moves until restart or seek
    assert_eq!(engine.tick(20_000.0), Tick::Idle);
    assert!(!engine.play(20_000.0));

    engine.restart();
    assert!(engine.play(20_000.0));
}

#[test]
fn speed_change_does_not_jump() {
    let mut engine = sample_engine();
    engine.play(0.0);
    engine.tick(1_000.0);
    assert_eq!(engine.state().current_time_ms, 1_000.0);

    engine.set_speed(Speed::Double, 1_000.0);
    assert_eq!(engine.state().current_time_ms, 1_000.0);

    engine.tick(1_500.0);
    assert_eq!(engine.state().current_time_ms, 2_000.0);
}

#[test]
fn seek_while_playing_keeps_playing() {
    let mut engine = sample_engine();
    engine.play(0.0);
    engine.seek_to_fraction(0.5, 100.0);

    assert!(engine.state().is_playing);
    assert_eq!(engine.state().current_time_ms, 2_250.0);

    engine.tick(600.0);
    assert_eq!(engine.state().current_time_ms, 2_750.0);
}

#[test]
fn rejected_load_keeps_previous_recording() {
    let mut engine = sample_engine();
    engine.seek_to_time_ms(1_000.0, 0.0);

    assert!(engine.load_json(&fixture_str("malformed.json")).is_err());
    assert_eq!(engine.recording().len(), 3);
    assert_eq!(engine.state().current_time_ms, 1_000.0);
}

#[test]
fn empty_recording_cannot_play() {
    let mut engine = Engine::new(MemoryView::new(), EngineOptions::default());
    engine.load_json(&fixture_str("empty.json")).unwrap();

    assert!(!engine.play(0.0));
    assert_eq!(engine.progress(), 1.0);
    assert_eq!(engine.active_command(), None);
}

#[test]
fn custom_prompt_is_used() {
    let options = EngineOptions {
        prompt: "$".to_string(),
        ..EngineOptions::default()
    };
    let mut engine = Engine::new(MemoryView::new(), options);
    engine.load_json(&fixture_str("sample.json")).unwrap();
    engine.seek_to_time_ms(0.0, 0.0);

    assert_eq!(engine.view().contents(), "\r\n$ ls\r\na.txt\n");
}
