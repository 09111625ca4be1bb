//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the registry lock is poisoned.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Channels with a registered rotation or pool.
    pub channels: Option<usize>,
}

/// GET /health
///
/// Answers 503 when the registry lock is poisoned.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let channels = state
        .manager
        .lock()
        .ok()
        .map(|manager| manager.channel_count());
    let (code, status) = if channels.is_some() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            channels,
        }),
    )
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
