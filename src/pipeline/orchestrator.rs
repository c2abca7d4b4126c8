use serde::Serialize;
use thiserror::Error;

use super::analysis::extractor::EventAnalyzer;
use super::analysis::types::ScheduleEvent;
use super::analysis::AnalysisError;
use super::extraction::cascade::ExtractionCascade;
use super::extraction::sanitize::{normalize_whitespace, passes_quality_gate};
use super::extraction::types::StrategyFailure;
use super::extraction::ExtractionError;
use super::fallback;
use super::truncate_chars;
use crate::config::MAX_ANALYSIS_TEXT_LEN;

// ---------------------------------------------------------------------------
// Input / output shapes
// ---------------------------------------------------------------------------

/// One unit of work: pasted text, document bytes, or (erroneously) neither.
/// Manual text wins when both are present.
#[derive(Debug, Default)]
pub struct PipelineInput {
    pub manual_text: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
}

/// The uniform response shape returned for every invocation. Exactly one of
/// `events` (on success) or `error` (on failure) is meaningful.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<ScheduleEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Success-path debug counters for the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub text_length: usize,
    pub events_found: usize,
}

impl ResultEnvelope {
    pub fn success(events: Vec<ScheduleEvent>, text_length: usize) -> Self {
        Self {
            success: true,
            debug: Some(DebugInfo {
                text_length,
                events_found: events.len(),
            }),
            events: Some(events),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: &PipelineError) -> Self {
        Self {
            success: false,
            events: None,
            error: Some(error.to_string()),
            debug: None,
            details: error.details(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure classes crossing the pipeline boundary. The transport adapter
/// uses the class to pick a status code; the envelope carries the message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No file or text provided")]
    NoInput,

    #[error("File does not look like a PDF")]
    NotAPdf,

    #[error("Could not extract enough text from the document (need more than 50 characters). Try pasting the text manually.")]
    TextTooShort,

    #[error("Could not read this document. Try pasting the text manually.")]
    Extraction(Vec<StrategyFailure>),

    #[error(transparent)]
    Analysis(AnalysisError),
}

impl PipelineError {
    /// Client-input errors are the caller's to fix, not pipeline defects.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NoInput | Self::NotAPdf | Self::TextTooShort)
    }

    /// Per-strategy (or fallback) diagnostics for the envelope `details`.
    fn details(&self) -> Option<Vec<String>> {
        match self {
            Self::Extraction(failures) => {
                Some(failures.iter().map(|f| f.to_string()).collect())
            }
            // NotConfigured never reaches the fallback, so no fallback detail.
            Self::Analysis(AnalysisError::NotConfigured) => None,
            Self::Analysis(_) => Some(vec!["regex-fallback: no events found".into()]),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Top-level pipeline policy: resolve the text source, analyze, fall back,
/// validate, and emit the envelope. Failure never crosses this boundary as
/// anything but a structured envelope.
pub struct ExtractionOrchestrator {
    cascade: ExtractionCascade,
    analyzer: EventAnalyzer,
}

impl ExtractionOrchestrator {
    pub fn new(analyzer: EventAnalyzer) -> Self {
        Self {
            cascade: ExtractionCascade::default(),
            analyzer,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.analyzer.is_configured()
    }

    /// Run the pipeline and fold any failure into the envelope shape.
    pub fn process(&self, input: PipelineInput) -> ResultEnvelope {
        match self.run(input) {
            Ok((events, text_length)) => ResultEnvelope::success(events, text_length),
            Err(e) => {
                tracing::warn!(error = %e, "pipeline failed");
                ResultEnvelope::failure(&e)
            }
        }
    }

    /// The fallible core. Used directly by the transport adapter, which
    /// needs the failure class for status-code mapping.
    pub fn run(
        &self,
        input: PipelineInput,
    ) -> Result<(Vec<ScheduleEvent>, usize), PipelineError> {
        let text = self.resolve_text(input)?;

        // Single authoritative quality gate, regardless of source.
        if !passes_quality_gate(&text) {
            return Err(PipelineError::TextTooShort);
        }

        let bounded = truncate_chars(&text, MAX_ANALYSIS_TEXT_LEN);

        let candidates = match self.analyzer.analyze(bounded) {
            Ok(events) => events,
            // Missing credential is a configuration error: surfaced
            // immediately, no fallback, no retry.
            Err(AnalysisError::NotConfigured) => {
                return Err(PipelineError::Analysis(AnalysisError::NotConfigured));
            }
            Err(cause) => {
                tracing::warn!(error = %cause, "analysis failed, trying regex fallback");
                let rescued = fallback::extract_events(bounded);
                if rescued.is_empty() {
                    return Err(PipelineError::Analysis(cause));
                }
                tracing::info!(count = rescued.len(), "regex fallback rescued events");
                rescued
            }
        };

        let events = finalize_events(candidates);
        Ok((events, bounded.len()))
    }

    /// Manual text wins when present and non-blank; otherwise the byte
    /// buffer goes through the cascade.
    fn resolve_text(&self, input: PipelineInput) -> Result<String, PipelineError> {
        if let Some(manual) = input.manual_text {
            let normalized = normalize_whitespace(&manual);
            if !normalized.is_empty() {
                tracing::info!(length = normalized.len(), "using manual text source");
                return Ok(normalized);
            }
        }

        let bytes = input.file_bytes.ok_or(PipelineError::NoInput)?;
        let extracted = self.cascade.extract(&bytes).map_err(|e| match e {
            ExtractionError::AllStrategiesFailed(failures) => {
                PipelineError::Extraction(failures)
            }
        })?;
        tracing::info!(
            strategy = extracted.strategy,
            length = extracted.text.len(),
            "using extracted text source"
        );
        Ok(extracted.text)
    }
}

/// Keep only entries with non-empty title and date, coerce dates to the
/// calendar-day portion, and assign sequential 1-based ids.
fn finalize_events(candidates: Vec<ScheduleEvent>) -> Vec<ScheduleEvent> {
    candidates
        .into_iter()
        .filter(|e| !e.title.trim().is_empty() && !e.date.trim().is_empty())
        .enumerate()
        .map(|(i, mut event)| {
            event.date = date_only(&event.date);
            event.id = Some(i as u32 + 1);
            event
        })
        .collect()
}

/// Drop any embedded time/timezone suffix: keep the portion before the
/// first `T` or space separator.
fn date_only(date: &str) -> String {
    date.trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_USABLE_TEXT_LEN;
    use crate::pipeline::analysis::client::MockCompletionClient;
    use crate::pipeline::analysis::prompt::AcademicYear;
    use crate::pipeline::analysis::types::EventType;

    const LONG_DATED_TEXT: &str = "Course schedule overview for the semester.\n\
        Midterm Exam on January 15, 2025 in the main hall.\n\
        Essay due March 3, 2025 by midnight.";

    const LONG_DATELESS_TEXT: &str = "This document rambles on at length about course \
        policies and grading philosophy without ever mentioning a single calendar date.";

    fn orchestrator_with(response: &str) -> ExtractionOrchestrator {
        let analyzer = EventAnalyzer::new(
            Box::new(MockCompletionClient::new(response)),
            AcademicYear { start_year: 2024 },
        );
        ExtractionOrchestrator::new(analyzer)
    }

    fn failing_orchestrator() -> ExtractionOrchestrator {
        let analyzer = EventAnalyzer::new(
            Box::new(MockCompletionClient::failing("model offline")),
            AcademicYear { start_year: 2024 },
        );
        ExtractionOrchestrator::new(analyzer)
    }

    fn manual(text: &str) -> PipelineInput {
        PipelineInput {
            manual_text: Some(text.into()),
            file_bytes: None,
        }
    }

    #[test]
    fn manual_text_happy_path() {
        let orch = orchestrator_with(
            r#"[{"title":"Quiz 1","date":"2024-09-10","type":"exam"},
                {"title":"Reading week","date":"2024-10-01","type":"reading"}]"#,
        );
        let envelope = orch.process(manual(LONG_DATED_TEXT));
        assert!(envelope.success);
        let events = envelope.events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, Some(1));
        assert_eq!(events[1].id, Some(2));
        let debug = envelope.debug.unwrap();
        assert_eq!(debug.events_found, 2);
        assert!(debug.text_length > MIN_USABLE_TEXT_LEN);
    }

    #[test]
    fn no_input_is_client_error() {
        let orch = orchestrator_with("[]");
        let err = orch.run(PipelineInput::default()).unwrap_err();
        assert!(err.is_client_error());
        let envelope = orch.process(PipelineInput::default());
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("No file or text provided"));
    }

    #[test]
    fn blank_manual_text_without_file_is_client_error() {
        let orch = orchestrator_with("[]");
        let err = orch.run(manual("   \n  ")).unwrap_err();
        assert!(matches!(err, PipelineError::NoInput));
    }

    #[test]
    fn short_text_is_rejected_by_the_gate() {
        let orch = orchestrator_with("[]");
        let err = orch.run(manual("too short")).unwrap_err();
        assert!(matches!(err, PipelineError::TextTooShort));
        assert!(err.is_client_error());
    }

    #[test]
    fn exactly_fifty_chars_is_rejected() {
        let orch = orchestrator_with("[]");
        let err = orch.run(manual(&"x".repeat(50))).unwrap_err();
        assert!(matches!(err, PipelineError::TextTooShort));
    }

    #[test]
    fn fifty_one_chars_passes_the_gate() {
        let orch = orchestrator_with("[]");
        let (events, text_length) = orch.run(manual(&"x".repeat(51))).unwrap();
        assert!(events.is_empty());
        assert_eq!(text_length, 51);
    }

    #[test]
    fn model_failure_falls_back_to_regex() {
        let orch = failing_orchestrator();
        let envelope = orch.process(manual(LONG_DATED_TEXT));
        assert!(envelope.success);
        let events = envelope.events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::Exam);
        assert_eq!(events[0].date, "2025-01-15");
    }

    #[test]
    fn unparseable_response_falls_back_to_regex() {
        let orch = orchestrator_with("I'm sorry, I can't produce JSON today.");
        let envelope = orch.process(manual(LONG_DATED_TEXT));
        assert!(envelope.success);
        assert_eq!(envelope.events.unwrap().len(), 2);
    }

    #[test]
    fn model_failure_and_empty_fallback_surface_original_error() {
        let orch = failing_orchestrator();
        let envelope = orch.process(manual(LONG_DATELESS_TEXT));
        assert!(!envelope.success);
        let error = envelope.error.unwrap();
        assert!(!error.is_empty());
        assert!(error.contains("model offline"));
        assert!(envelope.details.is_some());
    }

    #[test]
    fn missing_credential_skips_fallback() {
        let orch = ExtractionOrchestrator::new(EventAnalyzer::unconfigured());
        // Text contains a perfectly good date the fallback would find.
        let envelope = orch.process(manual(LONG_DATED_TEXT));
        assert!(!envelope.success);
        assert!(envelope.error.unwrap().contains("not configured"));
        // The fallback never ran, so no fallback diagnostic either.
        assert!(envelope.details.is_none());
    }

    #[test]
    fn entries_missing_title_or_date_are_filtered() {
        let orch = orchestrator_with(
            r#"[{"title":"Keep me","date":"2025-01-01","type":"class"},
                {"title":"","date":"2025-01-02","type":"class"},
                {"title":"No date","date":"","type":"class"}]"#,
        );
        let (events, _) = orch.run(manual(LONG_DATED_TEXT)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Keep me");
    }

    #[test]
    fn embedded_time_suffix_is_stripped() {
        let orch = orchestrator_with(
            r#"[{"title":"Exam","date":"2025-01-15T09:00:00Z","type":"exam"},
                {"title":"Lab","date":"2025-01-16 14:00","type":"class"}]"#,
        );
        let (events, _) = orch.run(manual(LONG_DATED_TEXT)).unwrap();
        assert_eq!(events[0].date, "2025-01-15");
        assert_eq!(events[1].date, "2025-01-16");
    }

    #[test]
    fn process_is_idempotent_with_deterministic_model() {
        let orch = orchestrator_with(
            r#"[{"title":"Quiz 1","date":"2024-09-10","type":"exam"}]"#,
        );
        let first = orch.process(manual(LONG_DATED_TEXT));
        let second = orch.process(manual(LONG_DATED_TEXT));
        assert_eq!(first.events, second.events);
    }

    #[test]
    fn extraction_failure_reports_one_detail_per_strategy() {
        let orch = orchestrator_with("[]");
        // Tiny binary non-PDF: every strategy fails or trips the gate.
        let envelope = orch.process(PipelineInput {
            manual_text: None,
            file_bytes: Some(vec![0u8, 1, 2, 3]),
        });
        assert!(!envelope.success);
        let details = envelope.details.unwrap();
        assert_eq!(details.len(), 3);
        assert!(details[0].starts_with("pdf-text-layer:"));
        assert!(details[1].starts_with("pdf-page-walker:"));
        assert!(details[2].starts_with("raw-bytes:"));
    }

    #[test]
    fn manual_text_wins_over_file_bytes() {
        let orch = orchestrator_with("[]");
        let input = PipelineInput {
            manual_text: Some(LONG_DATED_TEXT.into()),
            file_bytes: Some(vec![0u8; 4]),
        };
        // The garbage bytes would fail extraction; manual text wins.
        assert!(orch.run(input).is_ok());
    }

    #[test]
    fn overlong_text_is_bounded_before_analysis() {
        let orch = orchestrator_with("[]");
        let huge = "y".repeat(MAX_ANALYSIS_TEXT_LEN + 5_000);
        let (_, text_length) = orch.run(manual(&huge)).unwrap();
        assert_eq!(text_length, MAX_ANALYSIS_TEXT_LEN);
    }
}
