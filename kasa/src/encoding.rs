//! Encoding utilities for cryptocurrency addresses.

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Encode bytes to Base58Check (used in Bitcoin addresses)
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check encoded string into (version, payload).
pub fn base58check_decode(encoded: &str) -> Result<(Vec<u8>, Vec<u8>)> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding)?;

    if data.len() < 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: data.len(),
        });
    }

    let (payload, checksum) = data.split_at(data.len() - 4);
    let computed_checksum = double_sha256(payload);

    if checksum != &computed_checksum[..4] {
        return Err(Error::InvalidChecksum);
    }

    Ok((payload[..1].to_vec(), payload[1..].to_vec()))
}

/// Computes EIP-55 checksum encoding for an Ethereum address.
///
/// Returns a checksummed address string with mixed-case hex characters.
pub fn eip55_checksum(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = crate::hash::keccak256(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_addr.chars().enumerate() {
        if c.is_ascii_alphabetic() {
            let hash_nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };

            if hash_nibble >= 8 {
                result.push(c.to_ascii_uppercase());
            } else {
                result.push(c.to_ascii_lowercase());
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Check whether an address string carries a valid EIP-55 checksum.
///
/// Accepts the `0x` prefix; rejects wrong lengths, non-hex characters and
/// any letter whose case disagrees with the checksum rule.
pub fn is_eip55(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let mut bytes = [0u8; 20];
    if hex::decode_to_slice(body.to_ascii_lowercase(), &mut bytes).is_err() {
        return false;
    }

    eip55_checksum(&bytes) == address
}
