//! Bitget signing strategy: HMAC-SHA256 over the prehash, base64 digest.
//!
//! Prehash = `timestamp + METHOD + requestPath + body`, where:
//!
//! - `timestamp` is the caller-supplied header value when present, else
//!   epoch milliseconds minted once at signing time and reused for both the
//!   prehash and the `ACCESS-TIMESTAMP` header
//! - `requestPath` is `path?query` with the query exactly as received, and
//!   no trailing `?` when there is none
//! - `body` is the raw JSON body for POST/PUT/DELETE requests that carry
//!   one, empty otherwise
//!
//! The passphrase travels unsigned in `ACCESS-PASSPHRASE`; it authenticates
//! only via TLS paired with a valid signature.

use super::{CanonicalRequest, SignedRequest, SigningError, hmac_sha256_base64};

#[allow(clippy::too_many_arguments)]
pub fn sign(
    request: &CanonicalRequest<'_>,
    base_url: &str,
    api_key: &str,
    secret_key: &str,
    passphrase: &str,
    timestamp: Option<&str>,
    now_ms: u64,
) -> Result<SignedRequest, SigningError> {
    let timestamp = match timestamp {
        Some(t) => t.to_owned(),
        None => now_ms.to_string(),
    };

    let request_path = if request.raw_query.is_empty() {
        request.path.to_owned()
    } else {
        format!("{}?{}", request.path, request.raw_query)
    };

    let method = request.method.to_ascii_uppercase();
    let body = signable_body(&method, request.body);

    let mut prehash = format!("{}{}{}", timestamp, method, request_path).into_bytes();
    prehash.extend_from_slice(body);
    let signature = hmac_sha256_base64(secret_key.as_bytes(), &prehash)?;

    Ok(SignedRequest {
        url: format!("{}{}", base_url, request_path),
        headers: vec![
            ("ACCESS-KEY", api_key.to_owned()),
            ("ACCESS-SIGN", signature),
            ("ACCESS-TIMESTAMP", timestamp),
            ("ACCESS-PASSPHRASE", passphrase.to_owned()),
        ],
        body: body.to_vec(),
    })
}

/// Body bytes that participate in the prehash. Only mutating methods sign
/// (and forward) a body.
fn signable_body<'a>(method: &str, body: &'a [u8]) -> &'a [u8] {
    match method {
        "POST" | "PUT" | "DELETE" if !body.is_empty() => body,
        _ => b"",
    }
}
