//! Play command handler

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};

use rewindtty::player::{play_session, PlaybackResult, PlayerOptions, Speed};
use rewindtty::Config;

use super::{bookmark_storage, secs_to_ms};

/// Play a recording in the native player.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, speed: Option<f64>, start: f64) -> Result<()> {
    let config = Config::load()?;

    let mut engine = config.playback.engine_options();
    if let Some(value) = speed {
        match Speed::from_multiplier(value) {
            Some(speed) => engine.speed = speed,
            None => bail!("Unsupported speed {}: use 0.5, 1, 1.5, 2 or 3", value),
        }
    }

    let options = PlayerOptions {
        engine,
        tick_interval: Duration::from_millis(config.playback.tick_interval_ms.max(1)),
        seek_step_ms: secs_to_ms(config.playback.seek_step_secs),
        start_ms: secs_to_ms(start),
        storage: bookmark_storage(&config, file),
    };

    match play_session(file, options)? {
        PlaybackResult::Quit { position_ms } => {
            tracing::debug!(position_ms, "player closed");
        }
        PlaybackResult::Empty => {
            println!("{} contains no sessions", file.display());
        }
    }
    Ok(())
}
