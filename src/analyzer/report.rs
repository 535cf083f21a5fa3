//! Human-readable rendering of a [`SessionAnalysis`].

use std::fmt::Write;

use super::SessionAnalysis;

/// Entries shown per section of the printed summary.
const SHOWN_TOP: usize = 3;
const SHOWN_SLOWEST: usize = 2;
const SHOWN_ERRORS: usize = 2;

/// Format seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Render the summary printed by `rewindtty analyze`.
pub fn render_summary(analysis: &SessionAnalysis) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Session Summary");
    let _ = writeln!(out, "--------------------");
    let _ = writeln!(out, "Total commands:           {}", analysis.total_commands);
    let _ = writeln!(
        out,
        "Session duration:         {}",
        format_duration(analysis.total_duration_secs)
    );
    let _ = writeln!(
        out,
        "Average time per command: {:.1}s",
        analysis.avg_time_per_command
    );
    let _ = writeln!(
        out,
        "Commands with errors:     {} ({:.1}%)",
        analysis.commands_with_errors, analysis.error_percentage
    );

    if !analysis.top_commands.is_empty() {
        let _ = writeln!(out, "\nTop Commands");
        for (i, entry) in analysis.top_commands.iter().take(SHOWN_TOP).enumerate() {
            let _ = writeln!(out, "{}. {:<12} {} times", i + 1, entry.command, entry.count);
        }
    }

    if !analysis.slowest.is_empty() {
        let _ = writeln!(out, "\nSlowest Commands");
        for info in analysis.slowest.iter().take(SHOWN_SLOWEST) {
            let _ = writeln!(out, "{:<12} ({:.1}s)", info.command, info.duration_secs);
        }
    }

    if !analysis.errors.is_empty() {
        let _ = writeln!(out, "\nErrors");
        for info in analysis.errors.iter().take(SHOWN_ERRORS) {
            let _ = writeln!(
                out,
                "- {:<12} -> {}",
                info.command,
                info.error_output.as_deref().unwrap_or_default()
            );
        }
    }

    out
}
