//! Command-line interface definition

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{Parser, Subcommand};

/// Version string: package version plus build date, and the git SHA for
/// development builds.
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let date = option_env!("REWINDTTY_BUILD_DATE").unwrap_or("unknown");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) => format!("{} ({} {})", env!("CARGO_PKG_VERSION"), sha, date),
            None => format!("{} ({})", env!("CARGO_PKG_VERSION"), date),
        }
    })
}

fn play_long_about() -> String {
    format!(
        "Play a recording in the terminal.\n\n{}",
        rewindtty::player::render::controls_text()
    )
}

/// Replay recorded terminal sessions.
#[derive(Parser, Debug)]
#[command(name = "rewindtty", version = version(), about, long_about = None)]
pub struct Cli {
    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a recording in the terminal
    #[command(long_about = play_long_about())]
    Play {
        /// Path to the recording (JSON)
        file: PathBuf,

        /// Playback speed: 0.5, 1, 1.5, 2 or 3
        #[arg(long)]
        speed: Option<f64>,

        /// Start position in seconds
        #[arg(long, default_value_t = 0.0)]
        start: f64,
    },

    /// Print the output the recording has produced at a point in time
    Dump {
        /// Path to the recording (JSON)
        file: PathBuf,

        /// Position in seconds (end of the recording when omitted)
        #[arg(long)]
        at: Option<f64>,
    },

    /// Summarize commands, durations and failures in a recording
    Analyze {
        /// Path to the recording (JSON)
        file: PathBuf,
    },

    /// Upload a recording to the web player
    Upload {
        /// Path to the recording (JSON)
        file: PathBuf,

        /// Upload endpoint (defaults to `[upload] url` from the config)
        #[arg(long)]
        url: Option<String>,
    },

    /// Manage the bookmarks of a recording
    Bookmarks {
        /// Path to the recording (JSON)
        file: PathBuf,

        #[command(subcommand)]
        command: BookmarkCommands,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum BookmarkCommands {
    /// List bookmarks in time order
    List,
    /// Add a bookmark
    Add {
        /// Bookmark name
        name: String,

        /// Position in seconds
        #[arg(long)]
        at: f64,
    },
    /// Remove a bookmark by id
    Remove {
        /// Bookmark id as shown by `list`
        id: String,
    },
    /// Remove all bookmarks
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
