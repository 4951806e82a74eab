//! Network transport backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;

use super::{Transport, TransportError, WireResponse};
use crate::config::ClientConfig;

/// HTTP transport for talking to the real listing service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<WireResponse, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let ok = response.status().is_success();
        let body = response
            .json()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(WireResponse { ok, body })
    }
}
