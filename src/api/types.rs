//! Shared types for the API layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::pipeline::analysis::client::OpenAiClient;
use crate::pipeline::analysis::extractor::EventAnalyzer;
use crate::pipeline::analysis::prompt::AcademicYear;
use crate::pipeline::orchestrator::ExtractionOrchestrator;

/// Shared state for all routes: the orchestrator behind an `Arc`. It holds
/// only configuration and the completion client, so requests stay stateless.
#[derive(Clone)]
pub struct ApiContext {
    pub orchestrator: Arc<ExtractionOrchestrator>,
}

impl ApiContext {
    /// Build the context from the process environment. A missing API key is
    /// not fatal here: the pipeline surfaces it per request through the
    /// envelope, so the server still boots and reports health.
    pub fn from_env() -> Self {
        let analyzer = match OpenAiClient::from_env() {
            Some(Ok(client)) => {
                EventAnalyzer::new(Box::new(client), AcademicYear::today())
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "completion client init failed");
                EventAnalyzer::unconfigured()
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set; analysis will fail per request");
                EventAnalyzer::unconfigured()
            }
        };

        Self::with_orchestrator(ExtractionOrchestrator::new(analyzer))
    }

    pub fn with_orchestrator(orchestrator: ExtractionOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// JSON request body for `POST /api/extract`.
#[derive(Debug, Deserialize, Default)]
pub struct ExtractRequest {
    #[serde(rename = "manualText", default)]
    pub manual_text: Option<String>,
}
