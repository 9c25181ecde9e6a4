//! Unified wallet type for multi-chain key derivation.

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::seed::{phrase_to_seed, SEED_LEN};

/// A unified HD wallet that can derive keys for multiple cryptocurrencies.
///
/// This wallet holds a BIP39 mnemonic and derives a seed that can be used
/// to generate addresses for Bitcoin, Ethereum, and other coins following
/// BIP32/44/49 standards.
///
/// # Passphrase Support
///
/// The wallet supports an optional BIP39 passphrase (sometimes called
/// "25th word"). The same mnemonic with different passphrases produces
/// completely different wallets.
#[derive(Debug)]
pub struct Wallet {
    /// BIP39 mnemonic phrase.
    mnemonic: Zeroizing<String>,
    /// Seed derived from mnemonic + passphrase.
    seed: Zeroizing<[u8; SEED_LEN]>,
    /// Whether a passphrase was used.
    has_passphrase: bool,
}

impl Wallet {
    /// Generate a new wallet with a random mnemonic.
    ///
    /// Entropy comes from the operating system RNG; an RNG failure is
    /// fatal and surfaces as an error, never as a weaker fallback.
    ///
    /// # Arguments
    ///
    /// * `word_count` - Number of words (12, 15, 18, 21, or 24)
    /// * `passphrase` - Optional BIP39 passphrase for additional security
    ///
    /// # Errors
    ///
    /// Returns an error if the word count is invalid or entropy cannot be
    /// obtained.
    pub fn generate(word_count: usize, passphrase: Option<&str>) -> Result<Self> {
        if !matches!(word_count, 12 | 15 | 18 | 21 | 24) {
            return Err(Error::InvalidWordCount(word_count));
        }

        let mnemonic = Mnemonic::generate(word_count)?;
        Self::from_mnemonic(mnemonic.to_string().as_str(), passphrase)
    }

    /// Create a wallet from raw entropy bytes.
    ///
    /// # Arguments
    ///
    /// * `entropy` - Raw entropy bytes (16, 20, 24, 28, or 32 bytes for 12-24 words)
    /// * `passphrase` - Optional BIP39 passphrase
    ///
    /// # Errors
    ///
    /// Returns an error if the entropy length is invalid.
    pub fn from_entropy(entropy: &[u8], passphrase: Option<&str>) -> Result<Self> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Self::from_mnemonic(mnemonic.to_string().as_str(), passphrase)
    }

    /// Create a wallet from an existing mnemonic phrase.
    ///
    /// The phrase is validated against the English wordlist and its
    /// checksum before use.
    ///
    /// # Errors
    ///
    /// Returns an error if the mnemonic is invalid.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self> {
        let mnemonic: Mnemonic = phrase.parse()?;
        Ok(Self::build(&mnemonic.to_string(), passphrase))
    }

    /// Create a wallet from a phrase without wordlist or checksum validation.
    ///
    /// Seed stretching is defined over the phrase text, so any phrase
    /// yields a deterministic seed. Recovery flows use this to accept
    /// phrases whose checksum does not validate.
    pub fn from_phrase_unchecked(phrase: &str, passphrase: Option<&str>) -> Self {
        Self::build(phrase, passphrase)
    }

    fn build(phrase: &str, passphrase: Option<&str>) -> Self {
        let passphrase_str = passphrase.unwrap_or("");
        let seed = phrase_to_seed(phrase, passphrase_str);

        Self {
            mnemonic: Zeroizing::new(phrase.to_string()),
            seed,
            has_passphrase: !passphrase_str.is_empty(),
        }
    }

    /// Get the mnemonic phrase.
    ///
    /// **Security Warning**: Handle this value carefully as it can
    /// reconstruct all derived keys.
    #[inline]
    #[must_use]
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Get the seed bytes for key derivation.
    ///
    /// This seed can be used by chain-specific derivers (Bitcoin,
    /// Ethereum, etc.) to generate addresses following their respective
    /// standards.
    #[inline]
    #[must_use]
    pub fn seed(&self) -> &[u8; SEED_LEN] {
        &self.seed
    }

    /// Check if a passphrase was used to derive the seed.
    #[must_use]
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }

    /// Get the word count of the mnemonic.
    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.mnemonic.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_all_word_counts() {
        for count in [12, 15, 18, 21, 24] {
            let wallet = Wallet::generate(count, None).unwrap();
            assert_eq!(wallet.word_count(), count);
            // A generated phrase must round-trip through validation.
            assert!(Wallet::from_mnemonic(wallet.mnemonic(), None).is_ok());
        }
    }

    #[test]
    fn test_generate_rejects_invalid_word_count() {
        assert!(matches!(
            Wallet::generate(13, None),
            Err(Error::InvalidWordCount(13))
        ));
    }

    #[test]
    fn test_generate_with_passphrase() {
        let wallet = Wallet::generate(12, Some("secret")).unwrap();
        assert!(wallet.has_passphrase());
    }

    #[test]
    fn test_from_entropy() {
        let entropy = [0u8; 16];
        let wallet = Wallet::from_entropy(&entropy, None).unwrap();
        assert_eq!(wallet.mnemonic(), TEST_MNEMONIC);
    }

    #[test]
    fn test_from_mnemonic_rejects_bad_checksum() {
        // Last word altered so the checksum cannot match.
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(Wallet::from_mnemonic(phrase, None).is_err());
    }

    #[test]
    fn test_unchecked_accepts_any_phrase() {
        let wallet = Wallet::from_phrase_unchecked("not a real phrase", None);
        assert_eq!(wallet.mnemonic(), "not a real phrase");
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let wallet1 = Wallet::from_mnemonic(TEST_MNEMONIC, None).unwrap();
        let wallet2 = Wallet::from_mnemonic(TEST_MNEMONIC, Some("password")).unwrap();
        assert_ne!(wallet1.seed(), wallet2.seed());
    }

    #[test]
    fn test_deterministic_seed() {
        let wallet1 = Wallet::from_mnemonic(TEST_MNEMONIC, Some("test")).unwrap();
        let wallet2 = Wallet::from_mnemonic(TEST_MNEMONIC, Some("test")).unwrap();
        assert_eq!(wallet1.seed(), wallet2.seed());
    }

    #[test]
    fn test_seed_matches_bip39_reference() {
        // The manual PBKDF2 stretch must agree with the bip39 crate.
        let mnemonic: bip39::Mnemonic = TEST_MNEMONIC.parse().unwrap();
        let reference = mnemonic.to_seed("TREZOR");

        let wallet = Wallet::from_mnemonic(TEST_MNEMONIC, Some("TREZOR")).unwrap();
        assert_eq!(wallet.seed(), &reference);
    }
}
