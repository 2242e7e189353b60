//! MEXC diagnostic routes: connectivity ping and server-clock probe.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::exchange::ExchangeId;
use crate::gateway::state::AppState;

const PING_PATH: &str = "/api/v1/contract/ping";

/// `GET /api/mexc/test` - round-trip check against the MEXC host.
pub async fn mexc_test(State(state): State<Arc<AppState>>) -> Response {
    let url = format!("{}{}", state.upstream.base_url(ExchangeId::Mexc), PING_PATH);
    match state.forwarder.get(url, ExchangeId::Mexc.user_agent()).await {
        Ok(up) if (200..300).contains(&up.status) => {
            let data: Value = serde_json::from_slice(&up.body).unwrap_or(Value::Null);
            Json(json!({ "success": true, "data": data })).into_response()
        }
        Ok(up) => {
            tracing::error!(status = up.status, "MEXC test ping rejected");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": format!("MEXC responded with status {}", up.status),
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "MEXC test ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// `GET /mexc/_server_time` - relays the upstream `Date` response header
/// verbatim so clients can diagnose clock skew. The header is reported even
/// when the ping endpoint answers with an error status.
pub async fn mexc_server_time(State(state): State<Arc<AppState>>) -> Response {
    let url = format!("{}{}", state.upstream.base_url(ExchangeId::Mexc), PING_PATH);
    match state.forwarder.get(url, ExchangeId::Mexc.user_agent()).await {
        Ok(up) => {
            let server_date = up
                .headers
                .get("date")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let data: Value = serde_json::from_slice(&up.body).unwrap_or(Value::Null);
            let status =
                StatusCode::from_u16(up.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({
                    "success": status.is_success(),
                    "status": up.status,
                    "serverDate": server_date,
                    "data": data,
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "MEXC server time probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
