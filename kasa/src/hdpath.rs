//! BIP-32 derivation path support.
//!
//! Provides structured parsing and manipulation of hierarchical
//! deterministic key derivation paths like "m/44'/60'/0'/0/0".

use core::fmt;

use crate::error::{Error, Result};

/// A child index in a derivation path.
///
/// Can be either normal (non-hardened) or hardened.
/// Hardened indices are >= 2^31 in raw form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub const fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidDerivationPath)
        } else {
            Ok(Self::Normal(index))
        }
    }

    /// Create a hardened child index.
    pub const fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidDerivationPath)
        } else {
            Ok(Self::Hardened(index))
        }
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the raw index value (without hardened flag).
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    ///
    /// For hardened indices, this includes the hardened offset (2^31).
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{}", i),
            Self::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl core::str::FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.ends_with('\'') || s.ends_with('h') || s.ends_with('H') {
            let index: u32 = s[..s.len() - 1]
                .parse()
                .map_err(|_| Error::InvalidDerivationPath)?;
            Self::hardened(index)
        } else {
            let index: u32 = s.parse().map_err(|_| Error::InvalidDerivationPath)?;
            Self::normal(index)
        }
    }
}

/// A BIP-32 derivation path.
///
/// Represents paths like "m/44'/60'/0'/0/0" as a sequence of child indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Create an empty derivation path (master key).
    pub fn master() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Create a derivation path from a vector of child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a derivation path from a string.
    ///
    /// Supports formats like:
    /// - "m/44'/60'/0'/0/0"
    /// - "m/44h/60h/0h/0/0"
    /// - "44'/60'/0'/0/0"
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();

        if path.is_empty() || path == "m" || path == "M" {
            return Ok(Self::master());
        }

        let path = if path.starts_with("m/") || path.starts_with("M/") {
            &path[2..]
        } else {
            path
        };

        let mut indices = Vec::new();

        for component in path.split('/') {
            if component.is_empty() {
                return Err(Error::InvalidDerivationPath);
            }
            indices.push(component.parse()?);
        }

        Ok(Self { indices })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check if any index in the path is hardened.
    pub fn has_hardened(&self) -> bool {
        self.indices.iter().any(ChildIndex::is_hardened)
    }

    /// Append a child index to the path.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Create BIP-44 path: m/44'/coin_type'/account'/change/address_index
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(44)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }

    /// Create BIP-49 path: m/49'/coin_type'/account'/change/address_index
    pub fn bip49(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(49)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl core::str::FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index_normal() {
        let index = ChildIndex::normal(0).unwrap();
        assert!(!index.is_hardened());
        assert_eq!(index.index(), 0);
        assert_eq!(index.to_u32(), 0);
        assert_eq!(index.to_string(), "0");
    }

    #[test]
    fn test_child_index_hardened() {
        let index = ChildIndex::hardened(49).unwrap();
        assert!(index.is_hardened());
        assert_eq!(index.index(), 49);
        assert_eq!(index.to_u32(), 49 | 0x80000000);
        assert_eq!(index.to_string(), "49'");
    }

    #[test]
    fn test_child_index_overflow_rejected() {
        assert!(ChildIndex::normal(0x80000000).is_err());
        assert!(ChildIndex::hardened(0x80000000).is_err());
    }

    #[test]
    fn test_parse_path() {
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        assert_eq!(path.depth(), 5);
        assert_eq!(path.indices()[0], ChildIndex::Hardened(44));
        assert_eq!(path.indices()[1], ChildIndex::Hardened(60));
        assert_eq!(path.indices()[2], ChildIndex::Hardened(0));
        assert_eq!(path.indices()[3], ChildIndex::Normal(0));
        assert_eq!(path.indices()[4], ChildIndex::Normal(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DerivationPath::parse("m/44'/x/0").is_err());
        assert!(DerivationPath::parse("m//0").is_err());
        assert!(DerivationPath::parse("m/-1").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let path: DerivationPath = "m/49'/1'/0'/0/7".parse().unwrap();
        assert_eq!(path.to_string(), "m/49'/1'/0'/0/7");
    }

    #[test]
    fn test_master() {
        let path = DerivationPath::master();
        assert!(path.is_master());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_bip44_ethereum() {
        let path = DerivationPath::bip44(60, 0, 0, 3).unwrap();
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/3");
    }

    #[test]
    fn test_bip49_bitcoin_testnet() {
        let path = DerivationPath::bip49(1, 0, 0, 0).unwrap();
        assert_eq!(path.to_string(), "m/49'/1'/0'/0/0");
    }

    #[test]
    fn test_has_hardened() {
        let path1: DerivationPath = "m/0/1/2".parse().unwrap();
        assert!(!path1.has_hardened());

        let path2: DerivationPath = "m/44'/0'/0'".parse().unwrap();
        assert!(path2.has_hardened());
    }
}
