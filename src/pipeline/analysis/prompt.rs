use chrono::{Datelike, NaiveDate};

pub const EVENT_SYSTEM_PROMPT: &str = "You extract dated schedule events from documents. \
You respond with a JSON array and nothing else: no prose, no markdown fences, no explanation.";

/// The academic year used to resolve dates whose year the document omits.
///
/// Injectable so tests can pin the reference date instead of depending on
/// the wall clock. `start_year` is the calendar year of the autumn term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    pub start_year: i32,
}

impl AcademicYear {
    /// Anchor on a reference date: from August onward the autumn term is in
    /// the reference year, before that it started the year prior.
    pub fn from_reference(reference: NaiveDate) -> Self {
        let start_year = if reference.month() >= 8 {
            reference.year()
        } else {
            reference.year() - 1
        };
        Self { start_year }
    }

    pub fn today() -> Self {
        Self::from_reference(chrono::Local::now().date_naive())
    }
}

/// Build the event-extraction prompt. The caller truncates `text` to the
/// prompt budget before passing it in.
pub fn build_event_prompt(text: &str, year: AcademicYear) -> String {
    let autumn = year.start_year;
    let spring = year.start_year + 1;

    format!(
        r#"Extract every dated schedule event from the document below.

Return ONLY a JSON array of objects, each shaped exactly like:
  {{"title": "string", "date": "YYYY-MM-DD", "type": "exam|assignment|reading|class|other", "description": "optional string"}}

Rules:
- "type" must be one of: exam, assignment, reading, class, other.
- "date" must be a calendar date in YYYY-MM-DD form, no time component.
- If the document gives a month and day without a year, assume the current
  academic year: September through December dates fall in {autumn}, and
  January through May dates fall in {spring}.
- Skip entries with no date. Do not invent events.

<document>
{text}
</document>"#
    )
}
