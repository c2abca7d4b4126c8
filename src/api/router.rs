//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use super::extract;
use super::types::ApiContext;
use crate::config;

/// Build the API router. The UI is a pure consumer of the envelope, so
/// CORS is permissive.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/extract", post(extract::extract))
        .route("/api/health", get(health))
        .with_state(ctx)
        // Raise axum's default 2 MB body limit to the documented upload cap.
        .layer(DefaultBodyLimit::max(extract::MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}

/// Liveness plus whether a completion credential is configured.
async fn health(
    axum::extract::State(ctx): axum::extract::State<ApiContext>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": config::APP_VERSION,
        "analyzerConfigured": ctx.orchestrator.is_configured(),
    }))
}
