//! Proxy handlers: extract credentials, sign, forward, relay.
//!
//! One independent unit of work per inbound request. Signing strictly
//! precedes dispatch; credential failures never reach the network; whatever
//! the exchange answers comes back with its status and body untouched.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::credentials;
use crate::exchange::ExchangeId;
use crate::forwarder::UpstreamResponse;
use crate::gateway::error::{ErrorEnvelope, GatewayError};
use crate::gateway::state::AppState;
use crate::signing::{self, CanonicalRequest};

pub async fn proxy_mexc(
    state: State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(ExchangeId::Mexc, state, method, uri, headers, body).await
}

pub async fn proxy_bingx(
    state: State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(ExchangeId::BingX, state, method, uri, headers, body).await
}

pub async fn proxy_bitget(
    state: State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(ExchangeId::Bitget, state, method, uri, headers, body).await
}

/// Fallback for paths outside every route prefix.
pub async fn not_found() -> (StatusCode, Json<ErrorEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(404, "not found")),
    )
}

async fn relay(
    exchange: ExchangeId,
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match forward(exchange, &state, &method, &uri, &headers, &body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(exchange = %exchange, error = %err, "request rejected");
            err.into_response()
        }
    }
}

async fn forward(
    exchange: ExchangeId,
    state: &AppState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Response, GatewayError> {
    // Fail fast: no outbound I/O for a request with missing credentials.
    let creds = credentials::extract(exchange, headers)?;

    let path = upstream_path(exchange, uri);
    let request = CanonicalRequest {
        method: method.as_str(),
        path: &path,
        raw_query: uri.query().unwrap_or(""),
        body: body.as_ref(),
    };

    let signed = signing::sign(
        exchange,
        &creds,
        &request,
        state.upstream.base_url(exchange),
        epoch_millis(),
    )?;

    tracing::info!(
        exchange = %exchange,
        method = %method,
        path = %path,
        api_key = %creds.api_key_prefix(),
        "forwarding request"
    );

    let upstream = state
        .forwarder
        .dispatch(method.clone(), signed, exchange.user_agent())
        .await?;

    tracing::info!(exchange = %exchange, status = upstream.status, "upstream response");
    Ok(passthrough_response(upstream))
}

/// Strip the exchange's route prefix to recover the upstream path.
fn upstream_path(exchange: ExchangeId, uri: &Uri) -> String {
    let path = uri.path();
    let stripped = path.strip_prefix(exchange.route_prefix()).unwrap_or(path);
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Relay status and body verbatim; the gateway never reinterprets exchange
/// error codes.
fn passthrough_response(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_path_strips_prefix() {
        let uri: Uri = "/bingx/openApi/swap/v2/user/balance?a=1".parse().unwrap();
        assert_eq!(
            upstream_path(ExchangeId::BingX, &uri),
            "/openApi/swap/v2/user/balance"
        );
    }

    #[test]
    fn test_upstream_path_bare_prefix_becomes_root() {
        let uri: Uri = "/bitget".parse().unwrap();
        assert_eq!(upstream_path(ExchangeId::Bitget, &uri), "/");
    }
}
