//! Model-assisted event extraction: bounded prompt, completion call, and a
//! layered defensive parser for responses that ignore the output contract.

pub mod client;
pub mod extractor;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::{CompletionClient, OpenAiClient};
pub use extractor::EventAnalyzer;
pub use types::{EventType, ScheduleEvent};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("completion API key is not configured")]
    NotConfigured,

    #[error("could not connect to completion endpoint at {0}")]
    Connection(String),

    #[error("completion request timed out after {0}s")]
    Timeout(u64),

    #[error("completion endpoint returned HTTP {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("completion response shape was malformed: {0}")]
    MalformedResponse(String),

    #[error("no event array recoverable from model response")]
    UnparseableResponse,
}
