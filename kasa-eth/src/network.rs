//! Ethereum network selection and RPC endpoint resolution.

use std::fmt;

/// Named Ethereum networks with public default endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EthNetwork {
    /// Ethereum mainnet.
    #[default]
    Mainnet,
    /// Ethereum testnet (Sepolia).
    Testnet,
}

impl EthNetwork {
    /// Get the default public RPC endpoint for this network.
    #[inline]
    #[must_use]
    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://cloudflare-eth.com",
            Self::Testnet => "https://rpc.sepolia.org",
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for EthNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(pub String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown network {:?}, expected mainnet or testnet", self.0)
    }
}

impl std::error::Error for ParseNetworkError {}

impl std::str::FromStr for EthNetwork {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" | "sepolia" => Ok(Self::Testnet),
            other => Err(ParseNetworkError(other.to_string())),
        }
    }
}

/// Where balance queries are sent.
///
/// Resolution happens exactly once, before any request is issued; there
/// is no fallback to another provider afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcSource {
    /// A caller-supplied endpoint URL.
    Endpoint(String),
    /// The public default endpoint of a named network.
    Network(EthNetwork),
}

impl RpcSource {
    /// Resolve to a concrete endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Endpoint(url) => url,
            Self::Network(network) => network.default_rpc_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_endpoint_wins() {
        let source = RpcSource::Endpoint("http://localhost:8545".to_string());
        assert_eq!(source.url(), "http://localhost:8545");
    }

    #[test]
    fn network_resolves_to_default() {
        assert_eq!(
            RpcSource::Network(EthNetwork::Mainnet).url(),
            "https://cloudflare-eth.com"
        );
        assert_eq!(
            RpcSource::Network(EthNetwork::Testnet).url(),
            "https://rpc.sepolia.org"
        );
    }

    #[test]
    fn parse() {
        assert_eq!("mainnet".parse::<EthNetwork>().unwrap(), EthNetwork::Mainnet);
        assert_eq!("sepolia".parse::<EthNetwork>().unwrap(), EthNetwork::Testnet);
        assert!("goerli".parse::<EthNetwork>().is_err());
    }
}
