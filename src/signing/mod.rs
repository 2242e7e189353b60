//! Canonical request construction and per-exchange signing strategies.
//!
//! Each exchange is a distinct, non-interchangeable algorithm:
//!
//! - [`mexc`] - pass-through: the client-signed query is relayed
//!   byte-for-byte, no gateway-side HMAC
//! - [`bingx`] - HMAC-SHA256 over the lexicographically sorted query,
//!   hex digest, carried as a `signature` query parameter
//! - [`bitget`] - HMAC-SHA256 over `timestamp + METHOD + requestPath + body`,
//!   base64 digest, carried in `ACCESS-*` headers
//!
//! Strategies are pure: given a credential set, a canonical description of
//! the inbound request and a signing instant they produce a [`SignedRequest`]
//! ready for dispatch. Nothing here performs I/O or keeps state, so each
//! algorithm is independently testable with pinned timestamps.

pub mod bingx;
pub mod bitget;
pub mod mexc;

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credentials::CredentialSet;
use crate::exchange::ExchangeId;

/// Description of the inbound request a strategy works from.
///
/// Built fresh per request and discarded at its end; never cached or shared.
pub struct CanonicalRequest<'a> {
    /// HTTP method as received.
    pub method: &'a str,
    /// Upstream request path, inbound route prefix already stripped.
    pub path: &'a str,
    /// Query string exactly as received, without the leading `?`.
    /// Empty when the inbound request had no query.
    pub raw_query: &'a str,
    /// Raw request body bytes; empty when absent.
    pub body: &'a [u8],
}

/// Outbound request assembled by a strategy, ready for dispatch.
/// Carries no secret material; the signature and API key it holds are
/// exactly what goes on the wire.
#[derive(Debug)]
pub struct SignedRequest {
    pub url: String,
    /// Exchange-mandated credential headers.
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// Failure while canonicalizing or signing. Should not occur after
/// credential extraction has succeeded; reported as an internal error and
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("signing failed: {0}")]
    Hmac(String),
    /// Credential variant does not match the routed exchange. Indicates a
    /// routing logic defect.
    #[error("credential set does not match exchange {0}")]
    CredentialMismatch(ExchangeId),
}

/// Dispatch to the strategy selected by the router.
///
/// `now_ms` is the signing instant in epoch milliseconds, threaded in from
/// the caller so tests can pin it.
pub fn sign(
    exchange: ExchangeId,
    credentials: &CredentialSet,
    request: &CanonicalRequest<'_>,
    base_url: &str,
    now_ms: u64,
) -> Result<SignedRequest, SigningError> {
    match (exchange, credentials) {
        (
            ExchangeId::Mexc,
            CredentialSet::Mexc {
                api_key,
                request_time,
            },
        ) => Ok(mexc::passthrough(request, base_url, api_key, request_time)),
        (
            ExchangeId::BingX,
            CredentialSet::BingX {
                api_key,
                secret_key,
            },
        ) => bingx::sign(request, base_url, api_key, secret_key, now_ms),
        (
            ExchangeId::Bitget,
            CredentialSet::Bitget {
                api_key,
                secret_key,
                passphrase,
                timestamp,
            },
        ) => bitget::sign(
            request,
            base_url,
            api_key,
            secret_key,
            passphrase,
            timestamp.as_deref(),
            now_ms,
        ),
        _ => Err(SigningError::CredentialMismatch(exchange)),
    }
}

/// HMAC-SHA256 digest encoded as lowercase hex.
pub(crate) fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> Result<String, SigningError> {
    Ok(hex::encode(hmac_sha256(secret, message)?))
}

/// HMAC-SHA256 digest encoded as standard base64.
pub(crate) fn hmac_sha256_base64(secret: &[u8], message: &[u8]) -> Result<String, SigningError> {
    Ok(base64::engine::general_purpose::STANDARD.encode(hmac_sha256(secret, message)?))
}

fn hmac_sha256(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, SigningError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| SigningError::Hmac(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Split a raw query string into `(key, value)` pairs without decoding.
/// A bare `key` with no `=` yields an empty value.
pub(crate) fn query_pairs(raw_query: &str) -> impl Iterator<Item = (&str, &str)> {
    raw_query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}
