//! Outbound HTTP dispatch.
//!
//! Exactly one upstream call per inbound request, under a bounded timeout.
//! There are no automatic retries: trading endpoints are not guaranteed
//! idempotent, and a retried order placement could duplicate a live trade.
//! A timeout abandons the in-flight call and surfaces as a connection-class
//! failure. Dropping the returned future (client disconnect) cancels the
//! outbound call.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, USER_AGENT};
use reqwest::{Client, Method};

use crate::signing::SignedRequest;

/// Response received from the exchange, relayed without reinterpretation.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Opaque body bytes, forwarded verbatim.
    pub body: Bytes,
}

/// No usable response was received from the upstream: DNS failure, refused
/// connection, or timeout. Never retried.
#[derive(Debug, thiserror::Error)]
#[error("connection error")]
pub struct ForwardError(#[source] reqwest::Error);

impl ForwardError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        Self(err)
    }
}

/// Thin wrapper over a shared [`reqwest::Client`]. The client holds only
/// transport configuration; no request state crosses requests through it.
#[derive(Clone)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Send the assembled request and collect the response body.
    pub async fn dispatch(
        &self,
        method: Method,
        signed: SignedRequest,
        user_agent: &str,
    ) -> Result<UpstreamResponse, ForwardError> {
        let mut builder = self
            .client
            .request(method, &signed.url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, user_agent);
        for (name, value) in &signed.headers {
            builder = builder.header(*name, value.as_str());
        }
        if !signed.body.is_empty() {
            builder = builder.body(signed.body);
        }

        let response = builder.send().await.map_err(ForwardError::from_reqwest)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ForwardError::from_reqwest)?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    /// Unauthenticated GET, used by the diagnostic routes.
    pub async fn get(
        &self,
        url: String,
        user_agent: &str,
    ) -> Result<UpstreamResponse, ForwardError> {
        let signed = SignedRequest {
            url,
            headers: Vec::new(),
            body: Vec::new(),
        };
        self.dispatch(Method::GET, signed, user_agent).await
    }
}
