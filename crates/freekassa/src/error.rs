use thiserror::Error;

/// Errors returned by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or invalid required configuration. Raised before any network call.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP 401 from the gateway. Bad credentials, not retryable.
    #[error("authorization rejected: {0}")]
    Auth(String),

    /// HTTP 400 from the gateway. The raw body is kept for diagnostics.
    #[error("bad request: {0}")]
    Request(String),

    /// Any other non-2xx status, network failure, or unparseable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx response whose `type` field is not `"success"` on order creation.
    #[error("gateway rejected order: {raw}")]
    Business { raw: serde_json::Value },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
