//! Environment-driven configuration

use std::time::Duration;

use taplist_client::ClientConfig;

/// Terminal client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TAPLIST_API_URL | https://api.openbrewerydb.org/v1/breweries | Listing endpoint |
/// | TAPLIST_DEBOUNCE_MS | 2000 | Search debounce window (milliseconds) |
#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub client: ClientConfig,
}

impl TuiConfig {
    /// Load from environment variables, falling back to the library defaults
    pub fn from_env() -> Self {
        let mut client = match std::env::var("TAPLIST_API_URL") {
            Ok(url) => ClientConfig::new(url),
            Err(_) => ClientConfig::default(),
        };
        if let Some(debounce_ms) = std::env::var("TAPLIST_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            client = client.with_debounce(Duration::from_millis(debounce_ms));
        }
        Self { client }
    }
}
