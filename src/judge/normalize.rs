//! Output normalization
//!
//! Plain text equality after trimming trailing whitespace and unifying line
//! endings. No numeric tolerance, no locale handling.

/// Normalize program output for comparison
///
/// CRLF and lone CR become LF, trailing whitespace on each line is dropped,
/// and trailing whitespace (including blank lines) at the end is dropped.
/// Leading whitespace is significant and kept.
pub fn normalize_output(output: &str) -> String {
    let unified = output.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified.split('\n').map(str::trim_end).collect();
    lines.join("\n").trim_end().to_string()
}

/// Compare two outputs after normalization
pub fn outputs_match(expected: &str, actual: &str) -> bool {
    normalize_output(expected) == normalize_output(actual)
}

/// Trim trailing newlines and spaces for display
pub fn trim_display(output: &str) -> &str {
    output.trim_end_matches(['\n', '\r', ' '])
}
