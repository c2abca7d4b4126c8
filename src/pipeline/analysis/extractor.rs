use super::client::CompletionClient;
use super::parser::parse_event_response;
use super::prompt::{build_event_prompt, AcademicYear, EVENT_SYSTEM_PROMPT};
use super::types::ScheduleEvent;
use super::AnalysisError;
use crate::config::MAX_PROMPT_TEXT_LEN;
use crate::pipeline::truncate_chars;

/// Model-assisted event extraction: truncate → prompt → complete → parse.
///
/// Holds no per-request state; `None` for the client means no credential
/// was configured, which fails every analysis immediately without touching
/// the network.
pub struct EventAnalyzer {
    client: Option<Box<dyn CompletionClient + Send + Sync>>,
    year: AcademicYear,
}

impl EventAnalyzer {
    pub fn new(client: Box<dyn CompletionClient + Send + Sync>, year: AcademicYear) -> Self {
        Self {
            client: Some(client),
            year,
        }
    }

    /// An analyzer with no credential: every call returns `NotConfigured`.
    pub fn unconfigured() -> Self {
        Self {
            client: None,
            year: AcademicYear::today(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Extract events from `text`. The prompt embeds at most
    /// [`MAX_PROMPT_TEXT_LEN`] characters of input.
    pub fn analyze(&self, text: &str) -> Result<Vec<ScheduleEvent>, AnalysisError> {
        let client = self.client.as_ref().ok_or(AnalysisError::NotConfigured)?;

        let bounded = truncate_chars(text, MAX_PROMPT_TEXT_LEN);
        let prompt = build_event_prompt(bounded, self.year);

        let response = client.complete(EVENT_SYSTEM_PROMPT, &prompt)?;
        tracing::debug!(response_len = response.len(), "analyzer: model responded");

        let events = parse_event_response(&response)?;
        tracing::info!(count = events.len(), "analyzer: events parsed");
        Ok(events)
    }
}
