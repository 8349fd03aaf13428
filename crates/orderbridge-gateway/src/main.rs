//! orderbridge HTTP gateway binary.

use std::sync::Arc;

use clap::Parser;
use orderbridge_client::{FixtureSource, ResponseSource};
use orderbridge_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderbridge_gateway=info,tower_http=info".into()),
        )
        .init();

    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    let fixtures = match &config.fixtures_path {
        Some(path) => FixtureSource::from_path(path)?,
        None => FixtureSource::embedded()?,
    };
    let upstream: Arc<dyn ResponseSource> = Arc::from(config.source_config().build()?);

    info!(
        listen = %config.listen_addr,
        upstream = %upstream.describe(),
        fixtures = fixtures.cases().len(),
        policy = %config.deprecation_policy,
        request_timeout_ms = config.request_timeout.as_millis(),
        request_retries = config.request_retries,
        "Starting orderbridge gateway"
    );

    let state = AppState::new(upstream, fixtures, &config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
