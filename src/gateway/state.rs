//! Shared gateway state.
//!
//! Holds only transport configuration: the outbound client and the upstream
//! host table. Nothing request-scoped (credentials, signatures, canonical
//! strings) ever lands here, so requests share no mutable state.

use crate::config::UpstreamConfig;
use crate::forwarder::Forwarder;

pub struct AppState {
    pub forwarder: Forwarder,
    pub upstream: UpstreamConfig,
}

impl AppState {
    pub fn new(forwarder: Forwarder, upstream: UpstreamConfig) -> Self {
        Self { forwarder, upstream }
    }
}
