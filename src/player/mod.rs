//! Recording player module
//!
//! Provides the timeline playback engine and a native terminal front end.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `engine`: The playback engine (load, play/pause, speed, seek, bookmarks)
//! - `state`: PlaybackState, UiState and shared types (Speed, InputResult)
//! - `view`: Where dispatched output is written
//! - `playback/`: Timeline index, chunk cursor, clock, and bookmark storage
//! - `input/`: Keyboard and mouse input handling
//! - `render/`: UI rendering (progress bar, status bar, help)
//! - `native`: The interactive terminal player
//!
//! # Usage
//!
//! ```no_run
//! use rewindtty::player::{Engine, EngineOptions, MemoryView};
//!
//! let mut engine = Engine::new(MemoryView::new(), EngineOptions::default());
//! engine.load_json(r#"[{"command":"ls","duration":1.0,"chunks":[{"time":0.0,"data":"a\n"}]}]"#)?;
//! engine.seek_to_time_ms(1000.0, 0.0);
//! print!("{}", engine.view().contents());
//! # Ok::<(), rewindtty::recording::RecordingError>(())
//! ```

mod engine;
pub(crate) mod input;
mod native;
pub mod playback;
pub mod render;
pub mod state;
mod view;

pub use engine::{Engine, EngineOptions, DEFAULT_PROMPT};
pub use native::{play_session, PlaybackResult, PlayerOptions};
pub use state::{InputResult, PlaybackState, Speed, UiState};
pub use view::{MemoryView, StdoutView, TerminalView};
