//! Text-extraction cascade: turn raw document bytes into usable plain text.
//!
//! Strategies are tried in priority order (digital PDF text layer, per-page
//! walk, raw byte decode) and the first output that survives the quality
//! gate wins. Every rejected attempt is recorded so a total failure can
//! explain itself to the caller.

pub mod cascade;
pub mod pages;
pub mod pdf;
pub mod raw;
pub mod sanitize;
pub mod types;

#[cfg(test)]
pub mod test_pdf;

pub use cascade::ExtractionCascade;
pub use types::{ExtractedText, StrategyFailure, TextStrategy};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("every extraction strategy failed")]
    AllStrategiesFailed(Vec<StrategyFailure>),
}

impl ExtractionError {
    /// The per-strategy diagnostics, in attempt order.
    pub fn diagnostics(&self) -> &[StrategyFailure] {
        match self {
            Self::AllStrategiesFailed(failures) => failures,
        }
    }
}
