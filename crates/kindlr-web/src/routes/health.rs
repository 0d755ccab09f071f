//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    source: &'static str,
    kinds: usize,
}

/// Public health check endpoint.
///
/// Returns basic service health for load balancer probes. Never touches the
/// event source.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "kindlr",
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.name(),
        kinds: state.registry.len(),
    })
}
