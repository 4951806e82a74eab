//! Client error types

use thiserror::Error;

/// Terminal failure of one fetch cycle.
///
/// Stored inside [`FetchState`](crate::fetch::FetchState) and broadcast to
/// every subscriber, so the type is `Clone` and carries owned payloads
/// instead of the underlying library errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The transport could not complete the exchange
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status; body kept verbatim
    #[error("api error: {0}")]
    Api(serde_json::Value),

    /// The success body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_payload() {
        let body = serde_json::json!({"message": "not found"});
        let err = FetchError::Api(body.clone());
        assert_eq!(err, FetchError::Api(body));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
        assert!(
            FetchError::Decode("missing field `name`".into())
                .to_string()
                .starts_with("decode error")
        );
    }
}
