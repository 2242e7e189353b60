//! Health check handler

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Server time, ISO 8601.
    pub timestamp: String,
    pub message: &'static str,
}

/// Always 200. Touches no exchange; reachability of an upstream never
/// affects the gateway's own liveness.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        message: "BingX, MEXC & Bitget proxy running",
    })
}
