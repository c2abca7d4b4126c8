use serde::Serialize;

/// Plain text recovered from a document, plus which strategy produced it.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub strategy: &'static str,
}

/// One rejected cascade attempt: the strategy name and why it was rejected.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub reason: String,
}

impl std::fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

/// One concrete method for turning document bytes into plain text.
///
/// Implementations return their raw output; whitespace normalization and
/// the length gate are applied uniformly by the cascade. The error string
/// becomes the diagnostic reason for the attempt.
pub trait TextStrategy {
    fn name(&self) -> &'static str;

    fn attempt(&self, bytes: &[u8]) -> Result<String, String>;
}
