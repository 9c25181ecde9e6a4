//! ERC-20 read-only calls: `balanceOf`, `decimals`, `symbol`.
//!
//! Token metadata is best-effort: a contract that fails `decimals()` or
//! `symbol()` resolves to the named defaults instead of erroring, while a
//! failed `balanceOf` is a real error. Batch lookups isolate failures per
//! token so one misbehaving contract never hides the others.

use futures::future::join_all;
use tracing::warn;

use kasa::hash::keccak256;
use kasa::units::format_units;

use crate::address::parse_address;
use crate::error::Error;
use crate::rpc::EthCall;

/// Decimals assumed for contracts whose `decimals()` call fails.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Symbol assumed for contracts whose `symbol()` call fails.
pub const DEFAULT_TOKEN_SYMBOL: &str = "TKN";

/// A token balance with resolved metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    /// Token symbol, possibly the fallback default.
    pub symbol: String,
    /// Token decimals, possibly the fallback default.
    pub decimals: u8,
    /// Raw balance in token base units.
    pub raw: u128,
    /// Balance formatted with the resolved decimals.
    pub amount: String,
}

/// Per-favorite result of a batch balance lookup.
#[derive(Debug)]
pub struct TokenReport {
    /// Display name from the favorites store.
    pub name: String,
    /// Token contract address.
    pub address: String,
    /// The balance, or the error for this single entry.
    pub result: Result<TokenBalance, Error>,
}

/// First four bytes of the Keccak-256 hash of a function signature.
fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// ABI-encode `balanceOf(address)` calldata.
#[must_use]
pub fn encode_balance_of(owner: &[u8; 20]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32);
    data.extend_from_slice(&selector("balanceOf(address)"));
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(owner);
    data
}

/// ABI-encode `decimals()` calldata.
#[must_use]
pub fn encode_decimals() -> Vec<u8> {
    selector("decimals()").to_vec()
}

/// ABI-encode `symbol()` calldata.
#[must_use]
pub fn encode_symbol() -> Vec<u8> {
    selector("symbol()").to_vec()
}

/// Decode a single `uint256` return word into `u128`.
///
/// Values above `u128::MAX` are rejected rather than truncated.
fn decode_uint(data: &[u8]) -> Result<u128, Error> {
    if data.len() < 32 {
        return Err(Error::AbiDecode(format!(
            "uint word too short: {} bytes",
            data.len()
        )));
    }

    let word = &data[..32];
    if word[..16].iter().any(|&b| b != 0) {
        return Err(Error::AbiDecode("uint exceeds 128 bits".into()));
    }

    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

/// Decode a `uint8` return word.
fn decode_u8(data: &[u8]) -> Result<u8, Error> {
    let value = decode_uint(data)?;
    u8::try_from(value).map_err(|_| Error::AbiDecode(format!("uint8 out of range: {value}")))
}

/// Decode a dynamic `string` return value.
fn decode_string(data: &[u8]) -> Result<String, Error> {
    let offset = usize::try_from(decode_uint(data)?)
        .map_err(|_| Error::AbiDecode("string offset out of range".into()))?;

    let len_word = data
        .get(offset..offset + 32)
        .ok_or_else(|| Error::AbiDecode("string length out of bounds".into()))?;
    let len = usize::try_from(decode_uint(len_word)?)
        .map_err(|_| Error::AbiDecode("string length out of range".into()))?;

    let bytes = data
        .get(offset + 32..offset + 32 + len)
        .ok_or_else(|| Error::AbiDecode("string body out of bounds".into()))?;

    String::from_utf8(bytes.to_vec()).map_err(|_| Error::AbiDecode("string is not UTF-8".into()))
}

/// Fetch `decimals()` as a typed optional success.
async fn decimals_of(caller: &impl EthCall, token: &str) -> Option<u8> {
    match caller.call(token, &encode_decimals()).await {
        Ok(data) => decode_u8(&data).ok(),
        Err(_) => None,
    }
}

/// Fetch `symbol()` as a typed optional success.
async fn symbol_of(caller: &impl EthCall, token: &str) -> Option<String> {
    match caller.call(token, &encode_symbol()).await {
        Ok(data) => decode_string(&data).ok(),
        Err(_) => None,
    }
}

/// Query a token balance for `owner`, resolving metadata best-effort.
///
/// # Errors
///
/// A failed or undecodable `balanceOf` call is an error. Metadata
/// failures are not: they resolve to [`DEFAULT_TOKEN_DECIMALS`] and
/// [`DEFAULT_TOKEN_SYMBOL`].
pub async fn token_balance(
    caller: &impl EthCall,
    token: &str,
    owner: &str,
) -> Result<TokenBalance, Error> {
    let owner_bytes = parse_address(owner)?;

    let raw = decode_uint(&caller.call(token, &encode_balance_of(&owner_bytes)).await?)?;

    let decimals = match decimals_of(caller, token).await {
        Some(d) => d,
        None => {
            warn!(%token, "decimals() failed, assuming {DEFAULT_TOKEN_DECIMALS}");
            DEFAULT_TOKEN_DECIMALS
        }
    };
    let symbol = match symbol_of(caller, token).await {
        Some(s) => s,
        None => {
            warn!(%token, "symbol() failed, assuming {DEFAULT_TOKEN_SYMBOL:?}");
            DEFAULT_TOKEN_SYMBOL.to_string()
        }
    };

    Ok(TokenBalance {
        amount: format_units(raw, decimals),
        symbol,
        decimals,
        raw,
    })
}

/// Query balances for a list of favorite tokens concurrently.
///
/// Each `(address, name)` entry yields exactly one [`TokenReport`], in
/// input order. A failing entry records its error; it never aborts the
/// rest of the batch.
pub async fn batch_token_balances(
    caller: &impl EthCall,
    owner: &str,
    favorites: &[(String, String)],
) -> Vec<TokenReport> {
    let lookups = favorites.iter().map(|(address, name)| async move {
        TokenReport {
            name: name.clone(),
            address: address.clone(),
            result: token_balance(caller, address, owner).await,
        }
    });

    join_all(lookups).await
}
