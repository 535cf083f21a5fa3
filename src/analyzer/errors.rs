//! Detection of failure output in recorded chunks.

/// Phrases that indicate a command failed, matched case-insensitively.
pub const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "failed",
    "permission denied",
    "no such file",
    "command not found",
    "segmentation fault",
    "core dumped",
    "syntax error",
    "not permitted",
    "timed out",
    "killed",
];

/// Whether the text contains any error keyword.
pub fn has_error_indicators(data: &str) -> bool {
    let lower = data.to_lowercase();
    ERROR_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
