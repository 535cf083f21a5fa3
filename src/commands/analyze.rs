//! Analyze command handler

use std::path::Path;

use anyhow::{Context, Result};

use rewindtty::analyzer::render_summary;
use rewindtty::{analyze, Recording};

/// Print a summary of the recording.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path) -> Result<()> {
    let recording = Recording::load(file)
        .with_context(|| format!("Failed to load recording: {}", file.display()))?;
    let analysis = analyze(&recording);
    print!("{}", render_summary(&analysis));
    Ok(())
}
