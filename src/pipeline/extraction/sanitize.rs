use std::sync::LazyLock;

use regex::Regex;

use crate::config::MIN_USABLE_TEXT_LEN;

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\x0b\x0c]+").unwrap());

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize whitespace in a strategy's raw output before the quality gate.
/// Collapses runs of horizontal whitespace to one space and runs of three
/// or more newlines to exactly two, then trims.
pub fn normalize_whitespace(raw: &str) -> String {
    let collapsed = SPACE_RUNS.replace_all(raw, " ");
    let collapsed = NEWLINE_RUNS.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}

/// Quality gate: extracted text is usable iff strictly longer than
/// [`MIN_USABLE_TEXT_LEN`] characters after normalization. Counted in
/// characters, not bytes, so multibyte text is not over-credited.
pub fn passes_quality_gate(text: &str) -> bool {
    text.chars().nth(MIN_USABLE_TEXT_LEN).is_some()
}
