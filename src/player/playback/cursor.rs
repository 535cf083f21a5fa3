//! Forward-only chunk dispatch.
//!
//! The cursor marks the next chunk that has not been emitted yet. Advancing
//! it to a logical time yields exactly the output that became due since the
//! last call. There is no way to move it backward: a backward seek resets to
//! the origin and replays forward, because the terminal view can only be
//! cleared as a whole.

use crate::player::playback::timeline::TimelineIndex;
use crate::recording::Recording;

/// Position of the next undispatched chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub session_index: usize,
    pub chunk_index: usize,
    /// Whether the prompt line of `session_index` has been emitted
    pub prompted: bool,
}

impl Cursor {
    pub fn new(session_index: usize, chunk_index: usize) -> Self {
        Self {
            session_index,
            chunk_index,
            prompted: false,
        }
    }

    /// Back to the origin of the recording.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One unit of output that became due.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<'a> {
    /// Synthetic command line opening a session
    Prompt {
        session_index: usize,
        command: &'a str,
    },
    /// Recorded output chunk
    Output {
        session_index: usize,
        chunk_index: usize,
        data: &'a str,
    },
}

impl Dispatch<'_> {
    /// Text to hand to the terminal view.
    pub fn render(&self, prompt: &str) -> String {
        match self {
            Dispatch::Prompt { command, .. } => format!("\r\n{} {}\r\n", prompt, command),
            Dispatch::Output { data, .. } => (*data).to_string(),
        }
    }
}

/// Concatenate the rendered text of a batch of dispatches.
pub fn render_all(dispatches: &[Dispatch<'_>], prompt: &str) -> String {
    dispatches.iter().map(|d| d.render(prompt)).collect()
}

/// Advance the cursor to `target_ms`, returning everything newly due.
///
/// Chunk times are relative to their session, so each session is entered
/// only once the whole previous session has elapsed. The scan stops at the
/// first chunk later than the target.
pub fn advance_to<'a>(
    cursor: &mut Cursor,
    recording: &'a Recording,
    index: &TimelineIndex,
    target_ms: f64,
) -> Vec<Dispatch<'a>> {
    debug_assert_eq!(recording.len(), index.len(), "stale timeline index");
    debug_assert!(
        recording.is_empty() || cursor.session_index < recording.len(),
        "cursor session {} out of range",
        cursor.session_index
    );

    let mut dispatched = Vec::new();

    while let Some(session) = recording.session(cursor.session_index) {
        let session_start_ms = index.session_start_ms(cursor.session_index);

        if !cursor.prompted {
            if session_start_ms > target_ms {
                break;
            }
            dispatched.push(Dispatch::Prompt {
                session_index: cursor.session_index,
                command: &session.command,
            });
            cursor.prompted = true;
            cursor.chunk_index = 0;
        }

        debug_assert!(cursor.chunk_index <= session.chunks.len());

        while let Some(chunk) = session.chunks.get(cursor.chunk_index) {
            if session_start_ms + chunk.time_ms() > target_ms {
                return dispatched;
            }
            dispatched.push(Dispatch::Output {
                session_index: cursor.session_index,
                chunk_index: cursor.chunk_index,
                data: &chunk.data,
            });
            cursor.chunk_index += 1;
        }

        let session_end_ms = session_start_ms + session.duration_ms();
        if session_end_ms > target_ms || cursor.session_index + 1 >= recording.len() {
            break;
        }

        cursor.session_index += 1;
        cursor.chunk_index = 0;
        cursor.prompted = false;
    }

    if !dispatched.is_empty() {
        tracing::debug!(
            target_ms,
            count = dispatched.len(),
            session = cursor.session_index,
            chunk = cursor.chunk_index,
            "dispatched"
        );
    }

    dispatched
}

/// Reset the cursor and replay from the origin up to `target_ms`.
///
/// The result depends only on the recording and the target.
pub fn seek_to<'a>(
    cursor: &mut Cursor,
    recording: &'a Recording,
    index: &TimelineIndex,
    target_ms: f64,
) -> Vec<Dispatch<'a>> {
    cursor.reset();
    advance_to(cursor, recording, index, target_ms)
}
