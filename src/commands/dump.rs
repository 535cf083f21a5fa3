//! Dump command handler

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use rewindtty::{Config, Engine, MemoryView, Recording};

use super::secs_to_ms;

/// Render the output due at `at` seconds (or the end) into a string.
pub fn render_at(recording: Recording, config: &Config, at: Option<f64>) -> String {
    let mut engine = Engine::new(MemoryView::new(), config.playback.engine_options());
    engine.load_recording(recording);
    let target = at.map(secs_to_ms).unwrap_or(engine.state().total_duration_ms);
    engine.seek_to_time_ms(target, 0.0);
    engine.view().contents().to_string()
}

/// Print the output due at a point in time to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, at: Option<f64>) -> Result<()> {
    let config = Config::load()?;
    let recording = Recording::load(file)
        .with_context(|| format!("Failed to load recording: {}", file.display()))?;

    let output = render_at(recording, &config, at);
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
