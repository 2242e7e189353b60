//! The gateway's own error envelope.
//!
//! `{code, msg, data: null}` is the only response shape the gateway
//! manufactures itself. Everything an exchange actually answered with is
//! relayed verbatim instead; the caller owns each exchange's error
//! vocabulary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::credentials::MissingCredentials;
use crate::forwarder::ForwardError;
use crate::signing::SigningError;

/// Synthesized error body. `data` is always `null` on the wire.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: i32,
    pub msg: String,
    pub data: Option<()>,
}

impl ErrorEnvelope {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Failures the gateway reports on its own behalf.
///
/// Upstream HTTP errors are deliberately not represented here: any response
/// received from the exchange, whatever its status, is passed through
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Detected before any outbound I/O.
    #[error(transparent)]
    MissingCredentials(#[from] MissingCredentials),
    /// No response received: DNS, refused connection, or timeout.
    #[error("connection error")]
    Connection(#[from] ForwardError),
    /// Canonicalization or signing failed; a logic defect, not retried.
    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl GatewayError {
    fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            Self::MissingCredentials(_) => (StatusCode::BAD_REQUEST, 400),
            Self::Connection(_) | Self::Signing(_) => (StatusCode::INTERNAL_SERVER_ERROR, 500),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        (status, Json(ErrorEnvelope::new(code, self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_null_data() {
        let rendered =
            serde_json::to_string(&ErrorEnvelope::new(400, "missing required headers: ApiKey"))
                .unwrap();
        assert_eq!(
            rendered,
            r#"{"code":400,"msg":"missing required headers: ApiKey","data":null}"#
        );
    }

    #[test]
    fn test_missing_credentials_is_400() {
        let err = GatewayError::from(MissingCredentials {
            missing: vec!["X-API-KEY"],
        });
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, 400);
        assert!(err.to_string().contains("X-API-KEY"));
    }

    #[test]
    fn test_connection_error_message() {
        // An unreachable upstream must render exactly
        // {code:500, msg:"connection error", data:null}.
        let err = GatewayError::Connection(make_forward_error());
        assert_eq!(err.to_string(), "connection error");
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn make_forward_error() -> ForwardError {
        // Build a real reqwest error from an unroutable URL parse failure.
        let inner = reqwest::Client::new()
            .get("http://")
            .build()
            .expect_err("invalid URL must fail to build");
        ForwardError::from_reqwest(inner)
    }
}
