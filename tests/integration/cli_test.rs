//! Integration tests for the command-line interface

use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{fixtures_dir, rewindtty, temp_fixture};
use rewindtty::analyzer::render_summary;
use rewindtty::{analyze, Recording};

#[test]
fn dump_prints_output_at_position() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("dump")
        .arg(fixtures_dir().join("sample.json"))
        .args(["--at", "1.5"])
        .assert()
        .success()
        .stdout("\r\nrewindtty> ls\r\na.txt\nb.txt\n");
}

#[test]
fn dump_without_position_prints_everything() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("dump")
        .arg(fixtures_dir().join("sample.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No such file or directory"))
        .stdout(predicate::str::ends_with("\r\nrewindtty> ls\r\na.txt\n"));
}

#[test]
fn dump_honors_configured_prompt() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("rewindtty");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[playback]\nprompt = \"%\"\n").unwrap();

    rewindtty(&config_home)
        .arg("dump")
        .arg(fixtures_dir().join("sample.json"))
        .args(["--at", "0"])
        .assert()
        .success()
        .stdout("\r\n% ls\r\na.txt\n");
}

#[test]
fn dump_rejects_malformed_recording() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("dump")
        .arg(fixtures_dir().join("malformed.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed recording"));
}

#[test]
fn analyze_prints_summary() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("analyze")
        .arg(fixtures_dir().join("sample.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total commands:           3"))
        .stdout(predicate::str::contains("Commands with errors:     1 (33.3%)"))
        .stdout(predicate::str::contains("1. ls           2 times"))
        .stdout(predicate::str::contains("- cat missing.txt ->"));
}

#[test]
fn analyze_summary_snapshot() {
    let recording = Recording::load(fixtures_dir().join("sample.json")).unwrap();
    let summary = render_summary(&analyze(&recording));
    insta::assert_snapshot!(summary.trim_end(), @r"
    Session Summary
    --------------------
    Total commands:           3
    Session duration:         00:04
    Average time per command: 1.5s
    Commands with errors:     1 (33.3%)

    Top Commands
    1. ls           2 times
    2. cat missing.txt 1 times

    Slowest Commands
    ls           (2.0s)
    ls           (1.5s)

    Errors
    - cat missing.txt -> cat: missing.txt: No such file or directory
    ");
}

#[test]
fn analyze_empty_recording() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("analyze")
        .arg(fixtures_dir().join("empty.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total commands:           0"));
}

#[test]
fn bookmarks_add_list_remove() {
    let config_home = TempDir::new().unwrap();
    let (_temp_dir, path) = temp_fixture("sample.json");

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookmarks."));

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .args(["add", "failure", "--at", "2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("failure  (cat missing.txt)"));

    let listing = rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:02  failure"))
        .get_output()
        .stdout
        .clone();
    let listing = String::from_utf8(listing).unwrap();
    let id = listing
        .split_whitespace()
        .next()
        .expect("listing should start with an id")
        .to_string();

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .args(["remove", &id])
        .assert()
        .success();

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .args(["remove", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bookmark with id"));
}

#[test]
fn bookmarks_clear_empties_file() {
    let config_home = TempDir::new().unwrap();
    let (_temp_dir, path) = temp_fixture("sample.json");

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .args(["add", "one", "--at", "1"])
        .assert()
        .success();

    rewindtty(&config_home)
        .arg("bookmarks")
        .arg(&path)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 bookmark(s)"));

    let saved = std::fs::read_to_string(path.with_file_name("sample.json.bookmarks.json")).unwrap();
    assert_eq!(saved.trim(), "[]");
}

#[test]
fn config_init_then_show() {
    let config_home = TempDir::new().unwrap();

    rewindtty(&config_home)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config_home.path().join("rewindtty").join("config.toml").exists());

    rewindtty(&config_home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    rewindtty(&config_home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("tick_interval_ms = 100"));
}

#[test]
fn version_flag_prints_package_version() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
