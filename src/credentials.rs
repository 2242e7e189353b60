//! Per-request credential extraction.
//!
//! Every proxied request carries its own credentials in headers; nothing is
//! cached between requests. Extraction happens before any outbound I/O, so
//! a request with missing credentials never reaches the network.
//!
//! Header names are matched case-insensitively. Bitget accepts several
//! header-name aliases per field to tolerate different client conventions;
//! the first alias present wins, in the order listed below.

use axum::http::HeaderMap;

use crate::exchange::ExchangeId;

// Bitget header aliases, highest precedence first.
const BITGET_KEY_ALIASES: &[&str] = &["X-API-KEY", "ACCESS-KEY", "ApiKey"];
const BITGET_SECRET_ALIASES: &[&str] =
    &["X-SECRET-KEY", "X-SECRET", "ACCESS-SECRET", "SecretKey"];
const BITGET_PASSPHRASE_ALIASES: &[&str] =
    &["X-PASSPHRASE", "ACCESS-PASSPHRASE", "Passphrase"];
const BITGET_TIMESTAMP_ALIASES: &[&str] =
    &["X-TIMESTAMP", "ACCESS-TIMESTAMP", "Request-Time"];

/// Exchange-specific credential material for one request.
///
/// Secret fields are used transiently to compute a signature and must never
/// be logged or echoed into a response body. The `Debug` impl redacts them.
#[derive(Clone)]
pub enum CredentialSet {
    /// The caller has already signed its query string; the gateway only
    /// relocates these two values into upstream headers.
    Mexc {
        api_key: String,
        request_time: String,
    },
    BingX {
        api_key: String,
        secret_key: String,
    },
    Bitget {
        api_key: String,
        secret_key: String,
        passphrase: String,
        /// Signing timestamp supplied by the caller; minted by the gateway
        /// when absent.
        timestamp: Option<String>,
    },
}

impl CredentialSet {
    /// Truncated API-key prefix, safe for diagnostics.
    pub fn api_key_prefix(&self) -> &str {
        let key = match self {
            Self::Mexc { api_key, .. }
            | Self::BingX { api_key, .. }
            | Self::Bitget { api_key, .. } => api_key,
        };
        &key[..key.len().min(10)]
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mexc { .. } => "Mexc",
            Self::BingX { .. } => "BingX",
            Self::Bitget { .. } => "Bitget",
        };
        f.debug_struct(name)
            .field("api_key", &format!("{}...", self.api_key_prefix()))
            .finish_non_exhaustive()
    }
}

/// One or more required credential headers were absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required headers: {}", missing.join(", "))]
pub struct MissingCredentials {
    /// Canonical names of the absent fields.
    pub missing: Vec<&'static str>,
}

/// Read the credential set required by `exchange` from inbound headers.
pub fn extract(
    exchange: ExchangeId,
    headers: &HeaderMap,
) -> Result<CredentialSet, MissingCredentials> {
    match exchange {
        ExchangeId::Mexc => {
            let api_key = header_value(headers, "ApiKey");
            let request_time = header_value(headers, "Request-Time");
            match (api_key, request_time) {
                (Some(api_key), Some(request_time)) => Ok(CredentialSet::Mexc {
                    api_key,
                    request_time,
                }),
                (api_key, request_time) => Err(MissingCredentials {
                    missing: absent(&[
                        ("ApiKey", api_key.is_none()),
                        ("Request-Time", request_time.is_none()),
                    ]),
                }),
            }
        }
        ExchangeId::BingX => {
            let api_key = header_value(headers, "X-API-KEY");
            let secret_key = header_value(headers, "X-SECRET-KEY");
            match (api_key, secret_key) {
                (Some(api_key), Some(secret_key)) => Ok(CredentialSet::BingX {
                    api_key,
                    secret_key,
                }),
                (api_key, secret_key) => Err(MissingCredentials {
                    missing: absent(&[
                        ("X-API-KEY", api_key.is_none()),
                        ("X-SECRET-KEY", secret_key.is_none()),
                    ]),
                }),
            }
        }
        ExchangeId::Bitget => {
            let api_key = first_of(headers, BITGET_KEY_ALIASES);
            let secret_key = first_of(headers, BITGET_SECRET_ALIASES);
            let passphrase = first_of(headers, BITGET_PASSPHRASE_ALIASES);
            let timestamp = first_of(headers, BITGET_TIMESTAMP_ALIASES);
            match (api_key, secret_key, passphrase) {
                (Some(api_key), Some(secret_key), Some(passphrase)) => {
                    Ok(CredentialSet::Bitget {
                        api_key,
                        secret_key,
                        passphrase,
                        timestamp,
                    })
                }
                (api_key, secret_key, passphrase) => Err(MissingCredentials {
                    missing: absent(&[
                        ("X-API-KEY", api_key.is_none()),
                        ("X-SECRET-KEY", secret_key.is_none()),
                        ("X-PASSPHRASE", passphrase.is_none()),
                    ]),
                }),
            }
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn first_of(headers: &HeaderMap, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|name| header_value(headers, name))
}

fn absent(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_mexc_extract() {
        let map = headers(&[("ApiKey", "mx_key"), ("Request-Time", "1700000000000")]);
        let creds = extract(ExchangeId::Mexc, &map).unwrap();
        match creds {
            CredentialSet::Mexc {
                api_key,
                request_time,
            } => {
                assert_eq!(api_key, "mx_key");
                assert_eq!(request_time, "1700000000000");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_mexc_headers_case_insensitive() {
        let map = headers(&[("apikey", "mx_key"), ("request-time", "1")]);
        assert!(extract(ExchangeId::Mexc, &map).is_ok());
    }

    #[test]
    fn test_mexc_missing_names_fields() {
        let map = headers(&[("ApiKey", "mx_key")]);
        let err = extract(ExchangeId::Mexc, &map).unwrap_err();
        assert_eq!(err.missing, vec!["Request-Time"]);
        assert!(err.to_string().contains("Request-Time"));
    }

    #[test]
    fn test_bingx_missing_both() {
        let err = extract(ExchangeId::BingX, &HeaderMap::new()).unwrap_err();
        assert_eq!(err.missing, vec!["X-API-KEY", "X-SECRET-KEY"]);
    }

    #[test]
    fn test_bitget_aliases() {
        let map = headers(&[
            ("access-key", "bg_key"),
            ("secretkey", "bg_secret"),
            ("passphrase", "bg_pass"),
        ]);
        let creds = extract(ExchangeId::Bitget, &map).unwrap();
        match creds {
            CredentialSet::Bitget {
                api_key,
                secret_key,
                passphrase,
                timestamp,
            } => {
                assert_eq!(api_key, "bg_key");
                assert_eq!(secret_key, "bg_secret");
                assert_eq!(passphrase, "bg_pass");
                assert_eq!(timestamp, None);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_bitget_alias_precedence() {
        // X-API-KEY outranks ACCESS-KEY when both are present.
        let map = headers(&[
            ("X-API-KEY", "primary"),
            ("ACCESS-KEY", "secondary"),
            ("X-SECRET-KEY", "s"),
            ("X-PASSPHRASE", "p"),
        ]);
        match extract(ExchangeId::Bitget, &map).unwrap() {
            CredentialSet::Bitget { api_key, .. } => assert_eq!(api_key, "primary"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_bitget_optional_timestamp() {
        let map = headers(&[
            ("X-API-KEY", "k"),
            ("X-SECRET-KEY", "s"),
            ("X-PASSPHRASE", "p"),
            ("ACCESS-TIMESTAMP", "1700000000000"),
        ]);
        match extract(ExchangeId::Bitget, &map).unwrap() {
            CredentialSet::Bitget { timestamp, .. } => {
                assert_eq!(timestamp.as_deref(), Some("1700000000000"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_bitget_missing_all() {
        let err = extract(ExchangeId::Bitget, &HeaderMap::new()).unwrap_err();
        assert_eq!(err.missing, vec!["X-API-KEY", "X-SECRET-KEY", "X-PASSPHRASE"]);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = CredentialSet::BingX {
            api_key: "0123456789abcdef".to_string(),
            secret_key: "super-secret".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("0123456789"));
    }
}
