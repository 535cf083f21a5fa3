//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read a fixture to a string.
pub fn fixture_str(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).expect("fixture should exist")
}

/// Copy a fixture into a fresh temp dir so tests can write next to it.
///
/// The returned `TempDir` must be kept alive for the path to stay valid.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dest = temp_dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &dest).expect("Failed to copy fixture");
    (temp_dir, dest)
}

/// The binary under test with its config directory pointed at `config_home`.
pub fn rewindtty(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rewindtty").expect("binary should build");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}
