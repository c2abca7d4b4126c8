use syllascan::{api, config, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    api::server::serve().await
}
