//! Error types for core wallet operations.

use std::fmt;

/// A convenient Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during key derivation and encoding.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid mnemonic phrase.
    Mnemonic(bip39::Error),
    /// Invalid word count for mnemonic.
    InvalidWordCount(usize),
    /// Malformed derivation path.
    InvalidDerivationPath,
    /// Hardened derivation was requested from a watch-only (public) node.
    HardenedDerivationFromPublic,
    /// Invalid private key bytes (zero or not in the curve order).
    InvalidPrivateKey,
    /// Invalid public key encoding.
    InvalidPublicKey,
    /// Input had an unexpected length.
    InvalidLength {
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },
    /// Checksum verification failed.
    InvalidChecksum,
    /// Invalid Base58 or hex encoding.
    InvalidEncoding,
    /// Derivation tree depth limit (255) exceeded.
    MaxDepthExceeded,
    /// An underlying cryptographic primitive failed.
    CryptoError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            Self::InvalidWordCount(n) => {
                write!(f, "invalid word count {n}, must be 12, 15, 18, 21, or 24")
            }
            Self::InvalidDerivationPath => write!(f, "invalid derivation path"),
            Self::HardenedDerivationFromPublic => {
                write!(f, "hardened derivation requires a private key")
            }
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
            Self::InvalidPublicKey => write!(f, "invalid public key"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
            Self::InvalidChecksum => write!(f, "checksum mismatch"),
            Self::InvalidEncoding => write!(f, "invalid encoding"),
            Self::MaxDepthExceeded => write!(f, "derivation depth limit exceeded"),
            Self::CryptoError => write!(f, "cryptographic operation failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}
