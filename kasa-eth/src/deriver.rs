//! Ethereum address derivation from a unified wallet.

use kasa::{DerivationPath, Wallet, Xprv};

use crate::address::encode_address;
use crate::error::Error;

/// BIP-44 coin type for Ethereum.
const COIN_TYPE: u32 = 60;

/// Ethereum address deriver from a unified wallet seed.
///
/// Derives addresses along `m/44'/60'/0'/0/{index}`; only the final index
/// is caller-supplied. The same path is used on every Ethereum network.
#[derive(Debug)]
pub struct Deriver<'a> {
    /// Reference to the wallet for seed access.
    wallet: &'a Wallet,
}

/// A derived Ethereum address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// Derivation path used (e.g., `m/44'/60'/0'/0/0`).
    pub path: String,
    /// EIP-55 checksummed address.
    pub address: String,
}

impl<'a> Deriver<'a> {
    /// Create a new Ethereum deriver from a wallet.
    #[must_use]
    pub const fn new(wallet: &'a Wallet) -> Self {
        Self { wallet }
    }

    /// Derive the address at the given index.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn derive(&self, index: u32) -> Result<DerivedAddress, Error> {
        let path = DerivationPath::bip44(COIN_TYPE, 0, 0, index)?;

        let master = Xprv::from_seed(self.wallet.seed())?;
        let node = master.derive_path(&path)?;

        Ok(DerivedAddress {
            path: path.to_string(),
            address: encode_address(&node.public_key_uncompressed()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use kasa::encoding::is_eip55;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test ball";

    fn wallet() -> Wallet {
        Wallet::from_phrase_unchecked(TEST_MNEMONIC, None)
    }

    #[test]
    fn derived_address_passes_eip55_validation() {
        let wallet = wallet();
        let deriver = Deriver::new(&wallet);
        let derived = deriver.derive(0).unwrap();

        assert_eq!(derived.path, "m/44'/60'/0'/0/0");
        assert!(is_eip55(&derived.address), "got {}", derived.address);
    }

    #[test]
    fn derivation_is_reproducible() {
        let wallet = wallet();
        let deriver = Deriver::new(&wallet);
        assert_eq!(deriver.derive(0).unwrap(), deriver.derive(0).unwrap());
    }

    #[test]
    fn indices_produce_distinct_addresses() {
        let wallet = wallet();
        let deriver = Deriver::new(&wallet);
        assert_ne!(
            deriver.derive(0).unwrap().address,
            deriver.derive(1).unwrap().address
        );
    }

    #[test]
    fn derive_many_covers_range() {
        let wallet = wallet();
        let deriver = Deriver::new(&wallet);
        let batch = deriver.derive_many(2, 2).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].path, "m/44'/60'/0'/0/2");
        assert_eq!(batch[1], deriver.derive(3).unwrap());
    }
}
