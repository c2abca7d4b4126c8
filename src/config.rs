//! Environment-backed configuration and pipeline constants.
//!
//! All tunables live here so the pipeline modules stay free of `std::env`
//! lookups. The only hard requirement is `OPENAI_API_KEY`; everything else
//! has a default.

/// Application-level constants
pub const APP_NAME: &str = "Syllascan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum usable text length after normalization. Strictly greater-than:
/// exactly 50 characters is rejected.
pub const MIN_USABLE_TEXT_LEN: usize = 50;

/// Upper bound on text handed to the analysis stage.
pub const MAX_ANALYSIS_TEXT_LEN: usize = 10_000;

/// Upper bound on text embedded in the model prompt (token-budget control).
pub const MAX_PROMPT_TEXT_LEN: usize = 8_000;

/// Maximum length of a title derived by the regex fallback.
pub const MAX_TITLE_LEN: usize = 100;

/// Default completion endpoint base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for the single network-bound step (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Completion API credential, if configured. Absence is a configuration
/// error surfaced through the result envelope, never a crash.
pub fn api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Completion endpoint base URL (override for tests and proxies).
pub fn api_base() -> String {
    std::env::var("SYLLASCAN_API_BASE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Completion model name.
pub fn model_name() -> String {
    std::env::var("SYLLASCAN_MODEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Caller-enforced timeout for the completion call (seconds).
pub fn timeout_secs() -> u64 {
    std::env::var("SYLLASCAN_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

/// HTTP listen port.
pub fn port() -> u16 {
    std::env::var("SYLLASCAN_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}
