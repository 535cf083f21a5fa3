//! Integration tests for `rewindtty upload` against a local HTTP listener

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{fixtures_dir, rewindtty};

/// A request as seen by the server: lowercased header lines and the body.
struct Captured {
    headers: Vec<String>,
    body: String,
}

/// Serve exactly one request with a canned response.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let url = format!("http://{}/upload", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept upload");
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            headers.push(line.to_ascii_lowercase());
        }
        let length: usize = headers
            .iter()
            .find_map(|h| h.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().unwrap())
            .unwrap_or(0);
        let mut request_body = vec![0; length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();

        Captured {
            headers,
            body: String::from_utf8(request_body).unwrap(),
        }
    });

    (url, handle)
}

#[test]
fn upload_posts_envelope_and_prints_player_link() {
    let config_home = TempDir::new().unwrap();
    let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"id":42}"#);

    rewindtty(&config_home)
        .arg("upload")
        .arg(fixtures_dir().join("sample.json"))
        .args(["--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload successful!"))
        .stdout(predicate::str::contains(
            "You can check here: https://play.rewindtty.dev/play/42",
        ));

    let request = server.join().unwrap();
    assert!(request.headers[0].starts_with("post /upload"));
    assert!(request
        .headers
        .iter()
        .any(|h| h == "content-type: application/json"));
    assert!(request
        .headers
        .iter()
        .any(|h| h.starts_with("user-agent: rewindtty-cli/")));

    let document: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(document["metadata"]["total_commands"], 3);
    assert_eq!(document["sessions"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["sessions"][1]["command"], "cat missing.txt");
}

#[test]
fn upload_uses_configured_player_url() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("rewindtty");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[upload]\nplayer_url = \"https://player.test/p\"\n",
    )
    .unwrap();
    let (url, server) = serve_once("HTTP/1.1 201 Created", r#"{"id":"abc"}"#);

    rewindtty(&config_home)
        .arg("upload")
        .arg(fixtures_dir().join("sample.json"))
        .args(["--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://player.test/p/abc"));
    server.join().unwrap();
}

#[test]
fn upload_reports_server_error() {
    let config_home = TempDir::new().unwrap();
    let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#);

    rewindtty(&config_home)
        .arg("upload")
        .arg(fixtures_dir().join("sample.json"))
        .args(["--url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP status 500"))
        .stderr(predicate::str::contains("boom"));
    server.join().unwrap();
}

#[test]
fn upload_rejects_malformed_recording_without_sending() {
    let config_home = TempDir::new().unwrap();
    rewindtty(&config_home)
        .arg("upload")
        .arg(fixtures_dir().join("malformed.json"))
        .args(["--url", "http://127.0.0.1:9/upload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot upload"));
}
