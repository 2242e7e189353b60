//! BingX signing strategy: HMAC-SHA256 over the sorted query, hex digest.
//!
//! The canonical string is the union of the caller's query parameters and
//! two gateway-injected parameters - `timestamp` (the signing instant in
//! epoch milliseconds) and `recvWindow` (a fixed clock-skew tolerance) -
//! sorted lexicographically by key and joined as `key=value&...`. The hex
//! HMAC digest is appended to the outbound URL as a `signature` query
//! parameter; the API key travels in the `X-BX-APIKEY` header.

use std::collections::BTreeMap;

use super::{CanonicalRequest, SignedRequest, SigningError, hmac_sha256_hex, query_pairs};

/// Clock-skew tolerance in milliseconds, per BingX API documentation.
pub const RECV_WINDOW: &str = "60000";

/// Canonical string for signing: caller params plus injected
/// `timestamp`/`recvWindow`, key-sorted. The injected values always win over
/// caller-supplied duplicates since they must reflect the signing instant.
pub fn canonical_string(raw_query: &str, now_ms: u64) -> String {
    let mut params: BTreeMap<String, String> = query_pairs(raw_query)
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    params.insert("timestamp".to_owned(), now_ms.to_string());
    params.insert("recvWindow".to_owned(), RECV_WINDOW.to_owned());

    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn sign(
    request: &CanonicalRequest<'_>,
    base_url: &str,
    api_key: &str,
    secret_key: &str,
    now_ms: u64,
) -> Result<SignedRequest, SigningError> {
    let canonical = canonical_string(request.raw_query, now_ms);
    let signature = hmac_sha256_hex(secret_key.as_bytes(), canonical.as_bytes())?;

    // The outbound query carries exactly the signed string plus the
    // signature, so what BingX receives is what was hashed.
    let url = format!(
        "{}{}?{}&signature={}",
        base_url, request.path, canonical, signature
    );

    Ok(SignedRequest {
        url,
        headers: vec![("X-BX-APIKEY", api_key.to_owned())],
        body: request.body.to_vec(),
    })
}
