//! rewindtty - replay recorded terminal sessions
//!
//! A recording is a list of shell sessions with timestamped output. The
//! [`player::Engine`] replays it into a [`player::TerminalView`] with
//! play/pause, speed control, seeking and bookmarks. [`upload`] shares a
//! recording with the web player.

pub mod analyzer;
pub mod config;
pub mod player;
pub mod recording;
pub mod upload;

pub use analyzer::{analyze, SessionAnalysis};
pub use config::Config;
pub use player::{Engine, EngineOptions, MemoryView, PlaybackState, Speed, TerminalView};
pub use recording::{Chunk, Recording, RecordingError, Session};
pub use upload::{UploadError, Uploader};
