//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Number of airports loaded.
    pub airports: usize,
    /// Number of airports with scheduled routes.
    pub nodes: usize,
}

impl HealthStatus {
    pub fn ok(state: &AppState) -> Self {
        let network = state.network();
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            airports: network.airports().len(),
            nodes: network.graph().node_count(),
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(&state))
}
