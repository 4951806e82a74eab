//! Request transports
//!
//! The orchestration layer only needs one capability: perform a GET against
//! a URL and report whether the exchange succeeded plus the JSON body. Both
//! the real network client and the in-process test transport implement it.

mod http;
#[cfg(feature = "in-process")]
mod oneshot;

pub use http::HttpTransport;
#[cfg(feature = "in-process")]
pub use oneshot::RouterTransport;

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure of the exchange itself (unreachable host, timeout, unreadable body)
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Outcome of one HTTP exchange.
///
/// `ok` mirrors the HTTP status class; when it is `false` the body is the
/// service's error payload, not the success shape.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub ok: bool,
    pub body: serde_json::Value,
}

/// Generic request capability consumed by the fetch orchestrator
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<WireResponse, TransportError>;
}
