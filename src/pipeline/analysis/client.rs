use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::config;

/// Completion endpoint abstraction (allows mocking for tests).
pub trait CompletionClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, AnalysisError>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// Blocking: the orchestrator runs inside `spawn_blocking` and this is the
/// pipeline's single network-bound step. The request timeout is the
/// caller-enforced bound on that step; there is no automatic retry.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Build a client from the process environment. `None` when no API key
    /// is configured; the analyzer turns that into a configuration error.
    pub fn from_env() -> Option<Result<Self, AnalysisError>> {
        let key = config::api_key()?;
        Some(Self::new(
            &config::api_base(),
            &key,
            &config::model_name(),
            config::timeout_secs(),
        ))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: 0.1,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::Timeout(self.timeout_secs)
                } else {
                    AnalysisError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalysisError::MalformedResponse("response had no choices".into()))
    }
}

/// Mock completion client for tests. Returns a configured response.
pub struct MockCompletionClient {
    response: Result<String, &'static str>,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
        }
    }

    pub fn failing(reason: &'static str) -> Self {
        Self {
            response: Err(reason),
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(AnalysisError::HttpClient((*reason).to_string())),
        }
    }
}
