use super::pages::PdfPageWalker;
use super::pdf::PdfTextLayer;
use super::raw::RawBytesText;
use super::sanitize::{normalize_whitespace, passes_quality_gate};
use super::types::{ExtractedText, StrategyFailure, TextStrategy};
use super::ExtractionError;
use crate::config::MIN_USABLE_TEXT_LEN;

/// Ordered text-extraction cascade. Strategies run strictly sequentially
/// and the cascade stops at the first output that survives the quality
/// gate. Every rejected attempt is recorded as a diagnostic.
pub struct ExtractionCascade {
    strategies: Vec<Box<dyn TextStrategy + Send + Sync>>,
}

impl Default for ExtractionCascade {
    fn default() -> Self {
        Self {
            strategies: vec![
                Box::new(PdfTextLayer),
                Box::new(PdfPageWalker),
                Box::new(RawBytesText),
            ],
        }
    }
}

impl ExtractionCascade {
    /// Build a cascade over an explicit strategy list. Used by tests.
    pub fn with_strategies(strategies: Vec<Box<dyn TextStrategy + Send + Sync>>) -> Self {
        Self { strategies }
    }

    /// Try each strategy in order, returning the first normalized output
    /// longer than [`MIN_USABLE_TEXT_LEN`] characters. On exhaustion, fails
    /// with one diagnostic per attempted strategy, in attempt order.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let mut failures: Vec<StrategyFailure> = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let name = strategy.name();
            match strategy.attempt(bytes) {
                Ok(raw) => {
                    let text = normalize_whitespace(&raw);
                    if passes_quality_gate(&text) {
                        tracing::info!(
                            strategy = name,
                            length = text.len(),
                            "extraction cascade: strategy accepted"
                        );
                        return Ok(ExtractedText { text, strategy: name });
                    }
                    tracing::warn!(
                        strategy = name,
                        length = text.len(),
                        "extraction cascade: output below quality gate"
                    );
                    failures.push(StrategyFailure {
                        strategy: name,
                        reason: format!(
                            "output too short ({} chars, need > {})",
                            text.chars().count(),
                            MIN_USABLE_TEXT_LEN
                        ),
                    });
                }
                Err(reason) => {
                    tracing::warn!(
                        strategy = name,
                        reason = %reason,
                        "extraction cascade: strategy failed"
                    );
                    failures.push(StrategyFailure { strategy: name, reason });
                }
            }
        }

        Err(ExtractionError::AllStrategiesFailed(failures))
    }
}
