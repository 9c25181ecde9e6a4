//! Ethereum address computation with EIP-55 checksum encoding.

use kasa::encoding::eip55_checksum;
use kasa::hash::keccak256;

use crate::error::Error;

/// Compute the 20-byte account address from an uncompressed public key.
///
/// The address is the last 20 bytes of `keccak256(X || Y)` over the
/// 64-byte coordinate pair (the SEC1 `0x04` prefix is excluded).
#[must_use]
pub fn address_bytes(public_key_uncompressed: &[u8; 65]) -> [u8; 20] {
    let hash = keccak256(&public_key_uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Compute the EIP-55 checksummed address string for an uncompressed
/// public key.
#[must_use]
pub fn encode_address(public_key_uncompressed: &[u8; 65]) -> String {
    eip55_checksum(&address_bytes(public_key_uncompressed))
}

/// Parse a `0x`-prefixed (or bare) hex address into its 20 raw bytes.
///
/// Letter case is ignored; no checksum is enforced on input.
pub fn parse_address(address: &str) -> Result<[u8; 20], Error> {
    let body = address.strip_prefix("0x").unwrap_or(address);
    if body.len() != 40 {
        return Err(Error::InvalidAddress(address.to_string()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(body.to_ascii_lowercase(), &mut bytes)
        .map_err(|_| Error::InvalidAddress(address.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Uncompressed secp256k1 generator point = public key of secret key 1.
    const PUBKEY: [u8; 65] = hex_literal::hex!(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );

    #[test]
    fn known_address_for_key_one() {
        // Widely known address of the generator-point public key.
        assert_eq!(
            encode_address(&PUBKEY),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn encoding_is_pure() {
        assert_eq!(encode_address(&PUBKEY), encode_address(&PUBKEY));
    }

    #[test]
    fn output_passes_checksum_validation() {
        assert!(kasa::encoding::is_eip55(&encode_address(&PUBKEY)));
    }

    #[test]
    fn parse_roundtrip() {
        let encoded = encode_address(&PUBKEY);
        let parsed = parse_address(&encoded).unwrap();
        assert_eq!(parsed, address_bytes(&PUBKEY));
    }

    #[test]
    fn parse_accepts_lowercase() {
        let parsed = parse_address("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap();
        assert_eq!(parsed, address_bytes(&PUBKEY));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0xzz5f4552091a69125d5dfcb7b8c2659029395bdf").is_err());
    }
}
