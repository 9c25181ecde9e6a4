//! Block-explorer REST client for Bitcoin balances.

use std::time::Duration;

use tracing::debug;

use kasa::units::format_units;

use crate::error::Error;
use crate::network::Network;

/// Per-request timeout for explorer calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Satoshi count body returned by `GET {base}/address/{addr}/balance`.
fn parse_sat_body(body: &str) -> Result<u64, Error> {
    body.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidBalance(body.trim().to_string()))
}

/// HTTP client for a block-explorer REST API.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Explorer base URL, without trailing slash.
    base_url: String,
}

impl ExplorerClient {
    /// Create a client for the given network's default explorer.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(network: Network) -> Result<Self, Error> {
        Self::with_base_url(network.explorer_base())
    }

    /// Create a client against an explicit explorer base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Query the total confirmed balance of an address in satoshis.
    ///
    /// # Errors
    ///
    /// Transport failures, timeouts, non-success statuses and
    /// non-numeric payloads all surface as errors; nothing is retried.
    pub async fn balance_sats(&self, address: &str) -> Result<u64, Error> {
        let url = format!("{}/address/{}/balance", self.base_url, address);
        debug!(%url, "querying explorer balance");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_sat_body(&body)
    }

    /// Query the balance of an address, formatted in whole coins.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`balance_sats`](Self::balance_sats).
    pub async fn balance(&self, address: &str) -> Result<String, Error> {
        let sats = self.balance_sats(address).await?;
        Ok(format_units(u128::from(sats), 8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_sat_body("123456789").unwrap(), 123_456_789);
        assert_eq!(parse_sat_body("0\n").unwrap(), 0);
    }

    #[test]
    fn rejects_non_numeric_body() {
        assert!(matches!(
            parse_sat_body("<html>rate limited</html>"),
            Err(Error::InvalidBalance(_))
        ));
        assert!(parse_sat_body("-5").is_err());
    }

    #[test]
    fn formats_whole_coins() {
        assert_eq!(format_units(150_000_000, 8), "1.5");
        assert_eq!(format_units(1, 8), "0.00000001");
    }
}
