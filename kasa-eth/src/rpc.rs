//! JSON-RPC client for Ethereum nodes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use kasa::units::{format_units, parse_hex_quantity};

use crate::error::Error;
use crate::network::RpcSource;

/// Per-request timeout for RPC calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of decimals of the native currency (wei per ether).
const NATIVE_DECIMALS: u8 = 18;

/// Read-only contract call transport.
///
/// The one seam the ERC-20 helpers need; tests substitute a stub, the
/// production implementation is [`RpcClient`].
#[async_trait]
pub trait EthCall: Send + Sync {
    /// Execute `eth_call` against `to` with the given calldata and return
    /// the raw ABI-encoded result bytes.
    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, Error>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// HTTP JSON-RPC 2.0 client.
#[derive(Debug)]
pub struct RpcClient {
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Node endpoint URL.
    url: String,
    /// Monotonic request id.
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client for the resolved endpoint of an [`RpcSource`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(source: &RpcSource) -> Result<Self, Error> {
        Self::with_url(source.url())
    }

    /// Create a client against an explicit endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_url(url: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Get the endpoint URL this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a raw JSON-RPC request and return the `result` value.
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(%method, id, url = %self.url, "sending RPC request");

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(Error::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        response
            .result
            .ok_or_else(|| Error::InvalidPayload("response carries neither result nor error".into()))
    }

    /// Query the account balance in wei.
    ///
    /// # Errors
    ///
    /// Transport failures, timeouts, RPC errors and malformed quantities
    /// all surface as errors.
    pub async fn balance_wei(&self, address: &str) -> Result<u128, Error> {
        let result = self
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;

        let quantity = result
            .as_str()
            .ok_or_else(|| Error::InvalidPayload(result.to_string()))?;

        parse_hex_quantity(quantity).map_err(|_| Error::InvalidPayload(quantity.to_string()))
    }

    /// Query the account balance, formatted in ether.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`balance_wei`](Self::balance_wei).
    pub async fn balance(&self, address: &str) -> Result<String, Error> {
        let wei = self.balance_wei(address).await?;
        Ok(format_units(wei, NATIVE_DECIMALS))
    }
}

#[async_trait]
impl EthCall for RpcClient {
    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, Error> {
        let params = json!([
            { "to": to, "data": format!("0x{}", hex::encode(data)) },
            "latest"
        ]);

        let result = self.request("eth_call", params).await?;
        let payload = result
            .as_str()
            .ok_or_else(|| Error::InvalidPayload(result.to_string()))?;

        let body = payload.strip_prefix("0x").unwrap_or(payload);
        hex::decode(body).map_err(|_| Error::InvalidPayload(payload.to_string()))
    }
}
