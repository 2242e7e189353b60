//! exgate - Multi-Exchange Signing Gateway
//!
//! A stateless HTTP gateway that lets thin clients call trading-exchange
//! REST APIs without embedding exchange-specific authentication logic.
//! Credentials arrive on every request via headers, are used transiently
//! for signing, and are never stored.
//!
//! # Modules
//!
//! - [`exchange`] - Supported exchange identities
//! - [`credentials`] - Per-request credential extraction from headers
//! - [`signing`] - Canonical request construction and per-exchange signing
//! - [`forwarder`] - Outbound HTTP dispatch (one call, no retries)
//! - [`gateway`] - HTTP surface: routing, handlers, error envelope
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod credentials;
pub mod exchange;
pub mod forwarder;
pub mod gateway;
pub mod logging;
pub mod signing;

// Convenient re-exports at crate root
pub use credentials::CredentialSet;
pub use exchange::ExchangeId;
pub use forwarder::{Forwarder, UpstreamResponse};
pub use signing::{CanonicalRequest, SignedRequest};
