use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use genmedia_proxy::app;
use genmedia_proxy::config::settings::AppConfig;
use genmedia_proxy::infrastructure::higgsfield::client::HiggsfieldClient;
use genmedia_proxy::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("Refusing to start")?;
    info!("Loaded {:?}", config);
    let higgsfield = HiggsfieldClient::new(&config).context("Failed to build HTTP client")?;
    let port = config.server_port;

    let app = app::create_app(AppState::new(higgsfield));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
