//! The extraction pipeline: bytes/text → plain text → events → envelope.
//!
//! Data flows strictly downward and nothing here holds state between
//! invocations; every call is a pure function of its inputs plus external
//! service responses.

pub mod analysis;
pub mod extraction;
pub mod fallback;
pub mod orchestrator;

pub use orchestrator::{ExtractionOrchestrator, PipelineError, PipelineInput, ResultEnvelope};

/// Truncate to a character budget without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
