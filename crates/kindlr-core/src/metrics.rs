//! Prometheus metrics helpers for Kindlr.
//!
//! ```rust,ignore
//! use kindlr_core::metrics::{init_metrics, start_metrics_server};
//!
//! let handle = init_metrics()?;
//! start_metrics_server(9091, handle).await?;
//! ```
//!
//! Metric names are prefixed with `kindlr_` and suffixed with their unit
//! (`_total`, `_seconds`). Labels are kept to low-cardinality values such as
//! `source` and `outcome`.

use axum::{Router, routing::get};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

/// Non-empty catalog searches evaluated on the home page.
pub const SEARCH_QUERIES_TOTAL: &str = "kindlr_search_queries_total";
/// Sample fetches from the event source, by source and outcome.
pub const SAMPLE_FETCH_TOTAL: &str = "kindlr_sample_fetch_total";
/// Sample fetch latency.
pub const SAMPLE_FETCH_SECONDS: &str = "kindlr_sample_fetch_seconds";
/// Views rendered, by dispatch outcome.
pub const VIEWS_RENDERED_TOTAL: &str = "kindlr_views_rendered_total";
/// Kinds in the loaded registry.
pub const REGISTRY_KINDS: &str = "kindlr_registry_kinds";

/// Install the Prometheus recorder and register metric descriptions.
///
/// # Errors
///
/// Fails if a recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Serve `/metrics` on `port` in a background task.
///
/// The listener is bound before returning so port conflicts surface here.
pub async fn start_metrics_server(
    port: u16,
    handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Metrics server stopped");
        }
    });

    Ok(())
}

fn register_metrics() {
    describe_counter!(SEARCH_QUERIES_TOTAL, "Catalog searches evaluated");
    describe_counter!(SAMPLE_FETCH_TOTAL, "Sample event fetches by source and outcome");
    describe_histogram!(SAMPLE_FETCH_SECONDS, "Time spent fetching sample events");
    describe_counter!(VIEWS_RENDERED_TOTAL, "Event views rendered by dispatch outcome");
    describe_gauge!(REGISTRY_KINDS, "Number of kinds in the registry");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_is_repeatable() {
        register_metrics();
        register_metrics();
    }

    #[test]
    fn test_metric_names_are_prefixed() {
        for name in [
            SEARCH_QUERIES_TOTAL,
            SAMPLE_FETCH_TOTAL,
            SAMPLE_FETCH_SECONDS,
            VIEWS_RENDERED_TOTAL,
            REGISTRY_KINDS,
        ] {
            assert!(name.starts_with("kindlr_"), "{name}");
        }
    }
}
