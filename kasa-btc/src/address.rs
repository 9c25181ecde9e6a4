//! Bitcoin P2PKH address encoding.

use kasa::encoding::base58check_encode;
use kasa::hash::hash160;

use crate::network::Network;

/// Encode a compressed public key as a legacy P2PKH address.
///
/// The payload is `hash160(pubkey)` prefixed with the network's version
/// byte and Base58Check-encoded. One public key maps to exactly one
/// address per network.
#[must_use]
pub fn encode_p2pkh(public_key: &[u8; 33], network: Network) -> String {
    let pubkey_hash = hash160(public_key);
    base58check_encode(&[network.p2pkh_version()], &pubkey_hash)
}
