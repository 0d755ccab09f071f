//! Kindlr - HTTP server for browsing Nostr event kinds.
//!
//! Serves the searchable kind catalog with live sample events fetched from
//! relays, or from a JSONL fixture file when one is configured.

use std::sync::Arc;

use anyhow::Context;
use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use kindlr_core::metrics::{init_metrics, start_metrics_server};
use kindlr_web::{AppState, Config, EventSource, JsonlSource, RelaySource, router};

/// Kindlr - a browser for Nostr event kinds.
#[derive(Parser, Debug)]
#[command(name = "kindlr")]
#[command(about = "Searchable catalog of Nostr event kinds with live samples", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    // Optional Prometheus exporter
    if let Some(port) = config.metrics_port {
        let handle = init_metrics().context("failed to install metrics recorder")?;
        start_metrics_server(port, handle)
            .await
            .with_context(|| format!("failed to bind metrics port {port}"))?;
    }

    // Pick the event source
    let source: Arc<dyn EventSource> = match &config.fixture_path {
        Some(path) => Arc::new(JsonlSource::load(path, !config.fixture_skip_verify).await?),
        None => Arc::new(RelaySource::connect(&config.relays, config.fetch_timeout).await?),
    };

    // Create application state
    let state = AppState::new(config, source)?;

    // Build router with middleware
    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = request.uri().query().unwrap_or("")
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting kindlr server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
