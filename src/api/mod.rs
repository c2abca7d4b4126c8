//! HTTP adapter over the extraction pipeline.
//!
//! Deliberately thin: handlers map transport input (JSON body or multipart
//! upload) to the orchestrator's input shape and map the result envelope
//! back to a response. All extraction policy lives in the pipeline.

pub mod error;
pub mod extract;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
