//! Supported exchange identities.
//!
//! An [`ExchangeId`] is determined once per request from the inbound path
//! prefix and is immutable for the rest of that request's lifetime.

use std::fmt;

/// The closed set of upstream exchanges this gateway can sign for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeId {
    Mexc,
    BingX,
    Bitget,
}

impl ExchangeId {
    /// Inbound route prefix that selects this exchange.
    ///
    /// The remainder of the path after the prefix becomes the upstream
    /// request path.
    pub fn route_prefix(self) -> &'static str {
        match self {
            Self::Mexc => "/mexc",
            Self::BingX => "/bingx",
            Self::Bitget => "/bitget",
        }
    }

    /// User-Agent sent with forwarded requests.
    pub fn user_agent(self) -> &'static str {
        match self {
            Self::Mexc => "MEXC-Proxy/1.0",
            Self::BingX => "BingX-Proxy/1.0",
            Self::Bitget => "Bitget-Proxy/1.0",
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mexc => "MEXC",
            Self::BingX => "BingX",
            Self::Bitget => "Bitget",
        };
        f.write_str(name)
    }
}
