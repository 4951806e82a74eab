//! In-process transport driving an axum Router
//!
//! Uses the Tower `oneshot` pattern to call a router directly, with zero
//! network overhead. This is the transport integration tests run against.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::Request;
use std::collections::BTreeMap;
use tower::ServiceExt;

use super::{Transport, TransportError, WireResponse};

/// Transport that resolves requests against an in-process router
#[derive(Debug, Clone)]
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    /// Wrap an already-assembled router (`with_state` applied)
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn perform(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<WireResponse, TransportError> {
        let mut request = Request::builder().method("GET").uri(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let request = request
            .body(Body::empty())
            .map_err(|e| TransportError(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let ok = response.status().is_success();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let body = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError(format!("unreadable body: {e}")))?;
        Ok(WireResponse { ok, body })
    }
}
