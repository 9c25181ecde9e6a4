//! Error types for Ethereum wallet operations.

/// Errors that can occur during Ethereum derivation or balance queries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Key derivation failed.
    #[error("derivation error: {0}")]
    Derivation(#[from] kasa::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Failed to serialize or deserialize a JSON-RPC message.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node returned a JSON-RPC error object.
    #[error("RPC error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Human-readable error message.
        message: String,
    },

    /// The node returned a payload this client cannot interpret.
    #[error("invalid RPC payload: {0}")]
    InvalidPayload(String),

    /// Failed to decode ABI-encoded return data.
    #[error("ABI decode error: {0}")]
    AbiDecode(String),

    /// Malformed Ethereum address string.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
