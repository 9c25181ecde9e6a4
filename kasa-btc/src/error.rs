//! Error types for Bitcoin wallet operations.

/// Errors that can occur during Bitcoin derivation or balance queries.
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

    /// The explorer returned a payload that is not a satoshi count.
    #[error("invalid balance payload: {0:?}")]
    InvalidBalance(String),
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
