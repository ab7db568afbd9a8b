use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendboard::config::Config;
use trendboard::routes::{self, AppState};
use trendboard::upstream::NewsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("TRENDBOARD_CONFIG").unwrap_or_else(|_| "trendboard.toml".to_string());
    let config = Config::load(&config_path)?;
    info!(
        "Loaded configuration from {} (upstream {})",
        config_path, config.upstream.base_url
    );

    let token = config.upstream.token()?;
    let client = NewsClient::new(&config.upstream, token)?;

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState { config, client });
    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server starting on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
