//! MEXC pass-through strategy.
//!
//! The caller is assumed to have computed its own signature and embedded it
//! as a query parameter before reaching the gateway. The gateway relays the
//! inbound query string byte-for-byte (same key order, same encoding) and
//! relocates the two credential values into the `ApiKey` / `Request-Time`
//! headers the upstream host expects. No HMAC is computed here; the
//! client's signature is trusted completely for this exchange.

use super::{CanonicalRequest, SignedRequest};

pub fn passthrough(
    request: &CanonicalRequest<'_>,
    base_url: &str,
    api_key: &str,
    request_time: &str,
) -> SignedRequest {
    let url = if request.raw_query.is_empty() {
        format!("{}{}", base_url, request.path)
    } else {
        format!("{}{}?{}", base_url, request.path, request.raw_query)
    };

    SignedRequest {
        url,
        headers: vec![
            ("ApiKey", api_key.to_owned()),
            ("Request-Time", request_time.to_owned()),
        ],
        body: request.body.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://contract.mexc.com";

    fn request<'a>(path: &'a str, raw_query: &'a str) -> CanonicalRequest<'a> {
        CanonicalRequest {
            method: "GET",
            path,
            raw_query,
            body: b"",
        }
    }

    #[test]
    fn test_query_relayed_byte_identical() {
        // Includes a client-computed signature and pre-encoded values; both
        // must survive untouched.
        let raw = "symbol=BTC_USDT&ts=1700000000000&signature=abc%2Fdef";
        let signed = passthrough(&request("/api/v1/private/order/list", raw), BASE, "k", "t");
        assert_eq!(
            signed.url,
            format!("{}/api/v1/private/order/list?{}", BASE, raw)
        );
    }

    #[test]
    fn test_no_query_no_question_mark() {
        let signed = passthrough(&request("/api/v1/contract/ping", ""), BASE, "k", "t");
        assert_eq!(signed.url, format!("{}/api/v1/contract/ping", BASE));
    }

    #[test]
    fn test_credential_headers_relocated() {
        let signed = passthrough(&request("/p", ""), BASE, "mx_key", "1700000000000");
        assert_eq!(
            signed.headers,
            vec![
                ("ApiKey", "mx_key".to_string()),
                ("Request-Time", "1700000000000".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_signature_parameter_added() {
        let signed = passthrough(&request("/p", "a=1"), BASE, "k", "t");
        assert!(!signed.url.contains("signature"));
    }
}
