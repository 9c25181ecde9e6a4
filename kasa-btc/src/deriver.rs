//! Bitcoin address derivation from a unified wallet.

use kasa::{DerivationPath, Wallet, Xprv};

use crate::address::encode_p2pkh;
use crate::error::Error;
use crate::network::Network;

/// Bitcoin address deriver from a unified wallet seed.
///
/// Derives addresses along `m/49'/coin'/0'/0/{index}` where the coin type
/// follows the network (0 mainnet, 1 testnet) and only the final index is
/// caller-supplied. Addresses are encoded as legacy P2PKH even though the
/// account template uses the BIP-49 purpose segment; this mirrors the
/// original tool's behavior.
#[derive(Debug)]
pub struct Deriver<'a> {
    /// Reference to the wallet for seed access.
    wallet: &'a Wallet,
    /// Target network.
    network: Network,
}

/// A derived Bitcoin address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// Derivation path used (e.g., `m/49'/1'/0'/0/0`).
    pub path: String,
    /// Base58Check-encoded P2PKH address.
    pub address: String,
}

impl<'a> Deriver<'a> {
    /// Create a new Bitcoin deriver from a wallet.
    #[must_use]
    pub const fn new(wallet: &'a Wallet, network: Network) -> Self {
        Self { wallet, network }
    }

    /// Get the target network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Derive the address at the given index.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn derive(&self, index: u32) -> Result<DerivedAddress, Error> {
        let path = DerivationPath::bip49(self.network.coin_type(), 0, 0, index)?;

        let master = Xprv::from_seed(self.wallet.seed())?;
        let node = master.derive_path(&path)?;

        Ok(DerivedAddress {
            path: path.to_string(),
            address: encode_p2pkh(&node.public_key_compressed(), self.network),
        })
    }

    /// Derive a run of consecutive addresses starting at `start_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation fails.
    pub fn derive_many(&self, start_index: u32, count: u32) -> Result<Vec<DerivedAddress>, Error> {
        (start_index..start_index + count)
            .map(|index| self.derive(index))
            .collect()
    }
}
