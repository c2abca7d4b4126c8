//! Server lifecycle: bind the listener and serve the API router.

use std::net::SocketAddr;

use super::router::api_router;
use super::types::ApiContext;
use crate::config;

/// Bind on the configured port and serve until the process exits.
pub async fn serve() -> std::io::Result<()> {
    let ctx = ApiContext::from_env();
    let app = api_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], config::port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        version = config::APP_VERSION,
        "{} listening",
        config::APP_NAME
    );

    axum::serve(listener, app).await
}
