//! HTTP surface: routing, CORS, server lifecycle.

pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::routing::{any, get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::forwarder::Forwarder;
use state::AppState;

/// Build the gateway router over the given state.
///
/// Longest-prefix routing: the static diagnostic routes win over the
/// `/mexc` wildcard; anything outside the known prefixes falls through to
/// the 404 envelope. CORS is wide open since the expected caller is a
/// browser app supplying credentials per request.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/mexc/test", get(handlers::mexc_test))
        .route("/mexc/_server_time", get(handlers::mexc_server_time))
        .route("/mexc/{*path}", any(handlers::proxy_mexc))
        .route("/bingx/{*path}", any(handlers::proxy_bingx))
        .route("/bitget/{*path}", any(handlers::proxy_bitget))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let forwarder = Forwarder::new(Duration::from_secs(config.upstream.timeout_secs))?;
    let app_state = Arc::new(AppState::new(forwarder, config.upstream.clone()));
    let app = router(app_state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    println!("🚀 Gateway listening on http://{}", addr);
    println!("🌐 Health check:  /health");
    println!("📡 MEXC proxy:    /mexc/*");
    println!("📡 BingX proxy:   /bingx/*");
    println!("📡 Bitget proxy:  /bitget/*");
    tracing::info!(addr = %addr, "gateway started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Resolve on SIGINT or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
