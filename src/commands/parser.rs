//! Command line tokenizer: raw input → argument tokens.
//!
//! Tokens are separated by single spaces. There is no quoting or escaping, so
//! `a "b c"` yields three tokens.

/// Split a raw line into its non-empty, space-separated tokens.
///
/// Runs of spaces collapse, leading and trailing spaces are dropped, and an
/// empty or all-space line yields no tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The word currently being typed: everything after the last space.
pub fn word_before_cursor(text_before_cursor: &str) -> &str {
    match text_before_cursor.rfind(' ') {
        Some(idx) => &text_before_cursor[idx + 1..],
        None => text_before_cursor,
    }
}

/// Split text into the command name being typed and the rest of the line.
///
/// Leading spaces are skipped. Returns `None` when no name has been typed yet.
pub(crate) fn split_command_name(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start_matches(' ');
    if text.is_empty() {
        return None;
    }
    Some(text.split_once(' ').unwrap_or((text, "")))
}
