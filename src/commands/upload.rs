//! Upload command handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use rewindtty::upload::{payload_from_str, Uploader};
use rewindtty::Config;

/// Upload a recording, printing where the web player shows it.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, url: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read recording: {}", file.display()))?;
    let document = payload_from_str(&content)
        .with_context(|| format!("Cannot upload {}", file.display()))?;

    let uploader = Uploader::new(url.unwrap_or(&config.upload.url), config.upload.timeout());
    println!("Uploading {} to {}", file.display(), uploader.url());

    let receipt = uploader.upload(&document)?;
    println!("Upload successful!");
    match receipt.player_url(&config.upload.player_url) {
        Some(link) => println!("You can check here: {}", link),
        None => println!("The server did not return a recording id."),
    }
    Ok(())
}
