//! Deterministic regex fallback: scan lines for date-shaped substrings and
//! classify the surrounding context into an event.
//!
//! Intentionally crude and over-generating. It exists so the pipeline never
//! returns zero structure when a well-formed date is present, even after
//! every smarter strategy has failed. It never fails and needs no network.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::MAX_TITLE_LEN;
use crate::pipeline::analysis::types::{EventType, ScheduleEvent};

static LONG_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2}),?\s+(\d{4})",
    )
    .unwrap()
});

static SLASH_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2,4})\b").unwrap());

static ISO_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

/// Keyword sets checked in fixed order; first match wins.
const TYPE_KEYWORDS: &[(EventType, &[&str])] = &[
    (EventType::Exam, &["exam", "midterm", "final", "quiz", "test"]),
    (
        EventType::Assignment,
        &["assignment", "homework", "due", "submit", "project", "essay", "paper"],
    ),
    (EventType::Reading, &["reading", "read", "chapter"]),
    (EventType::Class, &["class", "lecture", "seminar", "session", "lab"]),
];

/// Extract events from text, one line at a time. Total: always returns,
/// possibly empty.
pub fn extract_events(text: &str) -> Vec<ScheduleEvent> {
    let mut events = Vec::new();
    for line in text.lines() {
        scan_line(line, &mut events);
    }
    tracing::debug!(count = events.len(), "regex fallback: events derived");
    events
}

fn scan_line(line: &str, events: &mut Vec<ScheduleEvent>) {
    for (pattern, parse) in [
        (&*LONG_FORM, parse_long_form as fn(&str) -> Option<NaiveDate>),
        (&*SLASH_FORM, parse_slash_form),
        (&*ISO_FORM, parse_iso_form),
    ] {
        for m in pattern.find_iter(line) {
            let Some(date) = parse(m.as_str()) else {
                continue;
            };
            let Some(title) = derive_title(line, m.start(), m.end()) else {
                continue;
            };
            events.push(ScheduleEvent {
                id: None,
                title,
                date: date.format("%Y-%m-%d").to_string(),
                event_type: classify_line(line),
                description: None,
            });
        }
    }
}

fn parse_long_form(matched: &str) -> Option<NaiveDate> {
    let cleaned = matched.replace(',', "");
    NaiveDate::parse_from_str(&cleaned, "%B %d %Y").ok()
}

/// Slash dates are day-first: `D/M/YY` or `D/M/YYYY`.
fn parse_slash_form(matched: &str) -> Option<NaiveDate> {
    let year_len = matched.rsplit('/').next()?.len();
    let fmt = if year_len == 2 { "%d/%m/%y" } else { "%d/%m/%Y" };
    NaiveDate::parse_from_str(matched, fmt).ok()
}

fn parse_iso_form(matched: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(matched, "%Y-%m-%d").ok()
}

/// Case-insensitive keyword classification over the whole line.
fn classify_line(line: &str) -> EventType {
    let lowered = line.to_lowercase();
    for (event_type, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *event_type;
        }
    }
    EventType::Other
}

/// Title = the longer of the text before/after the date match (tie favors
/// before), trimmed of separators and truncated. Empty → no event.
fn derive_title(line: &str, match_start: usize, match_end: usize) -> Option<String> {
    let before = line[..match_start].trim().trim_matches(['-', ':', ',']).trim();
    let after = line[match_end..].trim().trim_matches(['-', ':', ',']).trim();

    let chosen = if before.len() >= after.len() { before } else { after };
    if chosen.is_empty() {
        return None;
    }
    Some(chosen.chars().take(MAX_TITLE_LEN).collect())
}
