//! Recording statistics.
//!
//! Summarizes a recording the way a user skims their shell history: how
//! many commands ran, how long they took, which were repeated, which were
//! slow, and which printed something that looks like a failure.
//!
//! # Module Structure
//!
//! - [`errors`] - Failure keyword detection
//! - [`report`] - Human-readable summary rendering

mod errors;
mod report;

pub use errors::{has_error_indicators, ERROR_KEYWORDS};
pub use report::{format_duration, render_summary};

use crate::recording::Recording;

/// Maximum entries kept in [`SessionAnalysis::top_commands`].
pub const MAX_TOP_COMMANDS: usize = 10;
/// Maximum entries kept in [`SessionAnalysis::slowest`].
pub const MAX_SLOWEST: usize = 5;
/// Maximum entries kept in [`SessionAnalysis::errors`].
pub const MAX_ERRORS: usize = 10;

/// Per-session facts used by the analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInfo {
    pub command: String,
    pub duration_secs: f64,
    pub chunk_count: usize,
    /// First chunk that looked like a failure, trimmed
    pub error_output: Option<String>,
}

/// A command and how often it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFrequency {
    pub command: String,
    pub count: usize,
    pub total_duration_secs: f64,
}

/// Summary statistics of a recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionAnalysis {
    pub total_commands: usize,
    /// Wall-clock span: last end time minus first start time
    pub total_duration_secs: f64,
    pub avg_time_per_command: f64,
    pub commands_with_errors: usize,
    pub error_percentage: f64,
    /// Most frequent commands, most frequent first
    pub top_commands: Vec<CommandFrequency>,
    /// Longest-running commands, slowest first
    pub slowest: Vec<CommandInfo>,
    /// Commands with failure output, in recording order
    pub errors: Vec<CommandInfo>,
}

/// Analyze a recording.
pub fn analyze(recording: &Recording) -> SessionAnalysis {
    let sessions = recording.sessions();
    if sessions.is_empty() {
        return SessionAnalysis::default();
    }

    let commands: Vec<CommandInfo> = sessions
        .iter()
        .map(|session| CommandInfo {
            command: session.command.clone(),
            duration_secs: session.duration,
            chunk_count: session.chunks.len(),
            error_output: session
                .chunks
                .iter()
                .find(|chunk| has_error_indicators(&chunk.data))
                .map(|chunk| chunk.data.trim().to_string()),
        })
        .collect();

    let total_commands = commands.len();
    let first_start = sessions.first().map(|s| s.start_time).unwrap_or(0.0);
    let last_end = sessions
        .iter()
        .map(|s| s.end_time)
        .fold(f64::NEG_INFINITY, f64::max);
    let summed: f64 = commands.iter().map(|c| c.duration_secs).sum();
    let errors: Vec<CommandInfo> = commands
        .iter()
        .filter(|c| c.error_output.is_some())
        .cloned()
        .collect();
    let commands_with_errors = errors.len();

    SessionAnalysis {
        total_commands,
        total_duration_secs: (last_end - first_start).max(0.0),
        avg_time_per_command: summed / total_commands as f64,
        commands_with_errors,
        error_percentage: commands_with_errors as f64 / total_commands as f64 * 100.0,
        top_commands: top_commands(&commands),
        slowest: slowest(&commands),
        errors: errors.into_iter().take(MAX_ERRORS).collect(),
    }
}

fn top_commands(commands: &[CommandInfo]) -> Vec<CommandFrequency> {
    let mut table: Vec<CommandFrequency> = Vec::new();
    for info in commands {
        match table.iter_mut().find(|f| f.command == info.command) {
            Some(entry) => {
                entry.count += 1;
                entry.total_duration_secs += info.duration_secs;
            }
            None => table.push(CommandFrequency {
                command: info.command.clone(),
                count: 1,
                total_duration_secs: info.duration_secs,
            }),
        }
    }
    // Stable: ties keep first-appearance order
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(MAX_TOP_COMMANDS);
    table
}

fn slowest(commands: &[CommandInfo]) -> Vec<CommandInfo> {
    let mut sorted = commands.to_vec();
    sorted.sort_by(|a, b| b.duration_secs.total_cmp(&a.duration_secs));
    sorted.truncate(MAX_SLOWEST);
    sorted
}
